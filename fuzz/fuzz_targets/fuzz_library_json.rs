#![no_main]

use gamebird::library::parse_library;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a library file: parsing may fail, but must not panic,
    // and whatever loads must serialize back to something that loads again
    if let Ok(games) = parse_library(data) {
        let document = serde_json::json!({
            "games": games.iter().map(|game| game.to_json()).collect::<Vec<_>>(),
            "version": "1.0",
        });
        let bytes = serde_json::to_vec(&document).expect("library document serializes");
        let reloaded = parse_library(&bytes).expect("re-serialized library must parse");
        assert_eq!(reloaded, games);
    }
});
