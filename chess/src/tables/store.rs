/// Persisted magic constants.
///
/// Each slider family is stored in its own binary file holding exactly 64 little-endian u64
/// values, one per square in index order. A copy of the validated store is embedded at compile
/// time so that the tables can be built without touching the filesystem.
use std::{fs, path::Path};

use super::SliderFamily;
use crate::{
    error::{ChessError, ChessResult},
    square::Square,
};

const EMBEDDED_BISHOP: &[u8] = include_bytes!("../../../bins/bishop_magics.bin");
const EMBEDDED_ROOK: &[u8] = include_bytes!("../../../bins/rook_magics.bin");

/// Magic constants for both slider families
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagicStore {
    bishop: [u64; Square::COUNT],
    rook: [u64; Square::COUNT],
}

impl MagicStore {
    /// Size in bytes of a single family file
    pub const FILE_SIZE: usize = Square::COUNT * 8;

    pub fn new(bishop: [u64; Square::COUNT], rook: [u64; Square::COUNT]) -> Self {
        Self { bishop, rook }
    }

    /// Store compiled into the library
    pub fn embedded() -> ChessResult<Self> {
        Self::from_bytes(EMBEDDED_BISHOP, EMBEDDED_ROOK)
    }

    /// Decode both family files. Fails on anything but exactly 64 values per family.
    pub fn from_bytes(bishop: &[u8], rook: &[u8]) -> ChessResult<Self> {
        Ok(Self {
            bishop: decode(SliderFamily::Bishop, bishop)?,
            rook: decode(SliderFamily::Rook, rook)?,
        })
    }

    /// Load `bishop_magics.bin` and `rook_magics.bin` from the directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> ChessResult<Self> {
        let dir = dir.as_ref();
        let read = |family: SliderFamily| {
            let path = dir.join(family.file_name());
            tracing::debug!(path = %path.display(), "reading magic store");

            fs::read(&path).map_err(|source| ChessError::MagicStoreIo { path, source })
        };

        let bishop = read(SliderFamily::Bishop)?;
        let rook = read(SliderFamily::Rook)?;

        Self::from_bytes(&bishop, &rook)
    }

    /// Write both family files into the directory, creating it if needed
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> ChessResult<()> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir).map_err(|source| ChessError::MagicStoreIo {
            path: dir.to_path_buf(),
            source,
        })?;

        for family in SliderFamily::ALL {
            let path = dir.join(family.file_name());
            let bytes: Vec<u8> = self
                .magics(family)
                .iter()
                .flat_map(|m| m.to_le_bytes())
                .collect();

            fs::write(&path, bytes).map_err(|source| ChessError::MagicStoreIo {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), %family, "wrote magic store");
        }

        Ok(())
    }

    /// Constants of the given family, indexed by square
    pub fn magics(&self, family: SliderFamily) -> &[u64; Square::COUNT] {
        match family {
            SliderFamily::Bishop => &self.bishop,
            SliderFamily::Rook => &self.rook,
        }
    }
}

fn decode(family: SliderFamily, bytes: &[u8]) -> ChessResult<[u64; Square::COUNT]> {
    if bytes.len() != MagicStore::FILE_SIZE {
        return Err(ChessError::MagicStoreLength {
            family,
            expected: MagicStore::FILE_SIZE,
            found: bytes.len(),
        });
    }

    let mut magics = [0; Square::COUNT];
    for (magic, chunk) in magics.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0; 8];
        word.copy_from_slice(chunk);
        *magic = u64::from_le_bytes(word);
    }

    Ok(magics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_store_decodes() {
        let store = MagicStore::embedded().unwrap();

        assert!(store.magics(SliderFamily::Bishop).iter().all(|&m| m != 0));
        assert!(store.magics(SliderFamily::Rook).iter().all(|&m| m != 0));
        assert_eq!(store.magics(SliderFamily::Bishop)[0], 18018831494946945);
        assert_eq!(store.magics(SliderFamily::Rook)[0], 9979994641325359136);
    }

    #[test]
    fn truncated_store_rejected() {
        let short = &EMBEDDED_BISHOP[..MagicStore::FILE_SIZE - 8];
        let err = MagicStore::from_bytes(short, EMBEDDED_ROOK).unwrap_err();

        assert!(matches!(
            err,
            ChessError::MagicStoreLength {
                family: SliderFamily::Bishop,
                expected: 512,
                found: 504
            }
        ));
    }

    #[test]
    fn missing_store_rejected() {
        let dir = std::env::temp_dir().join("bitchess-missing-store");
        let _ = fs::remove_dir_all(&dir);

        assert!(matches!(
            MagicStore::from_dir(&dir),
            Err(ChessError::MagicStoreIo { .. })
        ));
    }

    #[test]
    fn store_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("bitchess-store-{}", std::process::id()));
        let store = MagicStore::embedded().unwrap();

        store.write_to_dir(&dir).unwrap();
        assert_eq!(MagicStore::from_dir(&dir).unwrap(), store);

        fs::remove_dir_all(&dir).unwrap();
    }
}
