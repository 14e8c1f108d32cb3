use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use pairs::PresentationEvent;
use serde::Serialize;

use crate::game::GameSummary;

/// Writes one JSON file per game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

#[derive(Serialize)]
pub struct GameRecording<'a> {
    summary: &'a GameSummary,
    events: Vec<PresentationEvent>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Writes `game_NNNNNN.json` with the summary and everything the presenter was told.
    pub fn write_game_recording(
        &mut self,
        summary: &GameSummary,
        events: Vec<PresentationEvent>,
    ) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &GameRecording { summary, events })?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}
