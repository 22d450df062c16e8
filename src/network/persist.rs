use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode::Options;
use tracing::info;

use crate::error::Result;
use crate::network::network::NeuralNetwork;

/// Fixed-width little-endian encoding; a file with bytes after the record
/// is rejected.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

impl NeuralNetwork {
    /// Writes the full network (sizes, learning rate, both layers) as a
    /// bincode record.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        codec().serialize_into(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Reads a network previously written by `save`. The decoded record is
    /// re-validated before it is returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<NeuralNetwork> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let network: NeuralNetwork = codec().deserialize(&bytes)?;
        info!(
            path = %path.display(),
            input = network.input_size(),
            hidden = network.hidden_size(),
            output = network.output_size(),
            "loaded model"
        );
        Ok(network)
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), "saved model as JSON");
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NeuralNetwork> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }
}
