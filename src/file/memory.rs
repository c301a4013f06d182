//! In-memory byte image, used for [`crate::EclFile::from_mem`] and for files assembled by an
//! [`crate::EclOutput`] over a `Vec<u8>`.

use super::Backend;

/// Byte image owned in memory
#[derive(Debug, Default)]
pub struct Memory(Vec<u8>);

impl From<Vec<u8>> for Memory {
    fn from(data: Vec<u8>) -> Self {
        Memory(data)
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.0
    }
}
