/// An encoded media fragment delivered by the platform encoder.
///
/// The controller only needs to know whether a fragment carries any data;
/// empty fragments are dropped without disturbing arrival order.
pub trait MediaChunk {
    fn byte_len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.byte_len() == 0
    }
}

impl MediaChunk for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaChunk for web_sys::Blob {
    fn byte_len(&self) -> usize {
        self.size() as usize
    }
}
