use crate::error::Error;

/// Assembled bytes, addressed from the first emitted byte.
#[derive(Debug, Clone, Default)]
pub struct Image {
    base: Option<u16>,
    bytes: Vec<u8>,
}

impl Image {
    pub fn new() -> Self {
        Image::default()
    }

    pub fn base(&self) -> Option<u16> {
        self.base
    }

    /// Address one past the last emitted byte.
    pub fn end(&self) -> Option<u32> {
        self.base.map(|base| base as u32 + self.bytes.len() as u32)
    }

    /// Append bytes at `addr`, zero-filling any gap. `addr` must not lie below `end()`.
    pub fn emit(&mut self, addr: u16, data: &[u8]) {
        let base = *self.base.get_or_insert(addr);
        let offset = (addr - base) as usize;
        if offset > self.bytes.len() {
            self.bytes.resize(offset, 0);
        }
        self.bytes.truncate(offset);
        self.bytes.extend_from_slice(data);
    }

    /// Overwrite previously emitted bytes.
    pub fn patch(&mut self, addr: u16, data: &[u8]) -> Result<(), Error> {
        let base = self.base.ok_or(Error::PatchOutside(addr))?;
        let start = addr
            .checked_sub(base)
            .ok_or(Error::PatchOutside(addr))? as usize;
        match self.bytes.get_mut(start..start + data.len()) {
            Some(slot) => {
                slot.copy_from_slice(data);
                Ok(())
            }
            None => Err(Error::PatchOutside(addr)),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
