use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use pairs::{Deck, EngineConfig};
use serde::de::DeserializeOwned;

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Reads an engine config from a JSON file. Missing fields get their defaults.
pub fn load_engine_config(path: &Path) -> anyhow::Result<EngineConfig> {
    load_json(path)
}

/// Reads a deck from a JSON array of cards. The deck is validated while parsing.
pub fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pairs_judge_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn deck_file_is_validated() {
        let path = write_temp(
            "odd_deck.json",
            r#"[{"id": 1, "name": "fig", "illustration": "f"},
                {"id": 2, "name": "fig", "illustration": "f"},
                {"id": 3, "name": "kiwi", "illustration": "k"}]"#,
        );
        let err = load_deck(&path).unwrap_err();
        assert!(err.to_string().contains("even number of cards"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn partial_engine_config() {
        let path = write_temp("config.json", r#"{"shuffle": false}"#);
        let config = load_engine_config(&path).unwrap();
        assert!(!config.shuffle);
        assert!(config.human_starts);
        assert_eq!(config.delays, pairs::Delays::default());
        std::fs::remove_file(path).unwrap();
    }
}
