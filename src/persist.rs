//! Save and load deformation-target activation weights as a flat JSON
//! name/weight mapping.
//!
//! Only scalar weights travel through this path; offsets are never persisted
//! here. Loading restores weights by name match alone and leaves unknown
//! names untouched.

use crate::errors::MirrorResult;
use crate::session::WeightClipboard;
use crate::shape::TargetBank;
use std::io::{Read, Write};

/// Write every target's weight to `writer` as pretty-printed JSON, keys
/// sorted by name. Returns the number of weights written.
pub fn save_weights<W: Write>(bank: &TargetBank, writer: W) -> MirrorResult<usize> {
    let clipboard = WeightClipboard::copy(bank);
    serde_json::to_writer_pretty(writer, &clipboard)?;
    Ok(clipboard.len())
}

/// Read a name/weight mapping from `reader` and apply it to same-named
/// targets. Returns the number of targets updated.
pub fn load_weights<R: Read>(bank: &mut TargetBank, reader: R) -> MirrorResult<usize> {
    let clipboard: WeightClipboard = serde_json::from_reader(reader)?;
    Ok(clipboard.paste(bank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::MorphTarget;
    use nalgebra::Point3;

    fn sample_bank() -> TargetBank {
        let mut bank = TargetBank::new(vec![Point3::origin()]);
        let mut smile = MorphTarget::zeroed("Smile", 1);
        smile.weight = 0.65;
        bank.add(smile).unwrap();
        let mut brow = MorphTarget::zeroed("BrowL", 1);
        brow.weight = 0.3;
        bank.add(brow).unwrap();
        bank
    }

    #[test]
    fn save_load_round_trip() {
        let bank = sample_bank();
        let mut buffer = Vec::new();
        assert_eq!(save_weights(&bank, &mut buffer).unwrap(), 2);

        let mut restored = sample_bank();
        restored.get_mut("Smile").unwrap().weight = 0.0;
        restored.get_mut("BrowL").unwrap().weight = 0.0;

        assert_eq!(load_weights(&mut restored, buffer.as_slice()).unwrap(), 2);
        assert_eq!(restored.get("Smile").unwrap().weight, 0.65);
        assert_eq!(restored.get("BrowL").unwrap().weight, 0.3);
    }

    #[test]
    fn load_ignores_unknown_names() {
        let json = br#"{"Nobody": 0.9, "Smile": 0.4}"#;
        let mut bank = sample_bank();
        assert_eq!(load_weights(&mut bank, json.as_slice()).unwrap(), 1);
        assert_eq!(bank.get("Smile").unwrap().weight, 0.4);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut bank = sample_bank();
        assert!(load_weights(&mut bank, b"not json".as_slice()).is_err());
    }
}
