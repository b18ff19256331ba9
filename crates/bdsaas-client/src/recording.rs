//! Downloaded call recordings.

/// Raw audio bytes of a call recording.
///
/// The service stores recordings as MP3. The bytes are returned as-is;
/// use [`Recording::is_mpeg_audio`] to check the payload before handing it
/// to a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording(Vec<u8>);

impl Recording {
    /// Wraps downloaded bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the payload starts like an MPEG audio stream.
    ///
    /// Accepts a bare MPEG frame sync (`0xFF` followed by a byte with the
    /// top three bits set) or an ID3v2 tag followed by a frame sync.
    pub fn is_mpeg_audio(&self) -> bool {
        let bytes = self.as_bytes();
        if is_frame_sync(bytes) {
            return true;
        }
        match id3v2_len(bytes) {
            Some(skip) => bytes.get(skip..).is_some_and(is_frame_sync),
            None => false,
        }
    }
}

impl AsRef<[u8]> for Recording {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Recording {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

fn is_frame_sync(bytes: &[u8]) -> bool {
    matches!(bytes, [0xFF, second, ..] if second & 0xE0 == 0xE0)
}

/// Total length of a leading ID3v2 tag (header plus syncsafe body size).
fn id3v2_len(bytes: &[u8]) -> Option<usize> {
    let header = bytes.get(..10)?;
    if &header[..3] != b"ID3" {
        return None;
    }
    let size = header[6..10]
        .iter()
        .try_fold(0usize, |acc, &b| (b & 0x80 == 0).then_some((acc << 7) | b as usize))?;
    let footer = if header[5] & 0x10 != 0 { 10 } else { 0 };
    Some(10 + size + footer)
}
