use std::fs::File;
use std::hash::Hasher;
use std::io::{BufReader, Error, Read, Write};
use std::path::Path;
use twox_hash::XxHash64;

/// Feeds everything written into it to a [Hasher].
pub struct FileHasher<T: Hasher> {
    hasher: T,
}

impl<T: Hasher> FileHasher<T> {
    pub fn new(hasher: T) -> FileHasher<T> {
        FileHasher { hasher }
    }

    pub fn hash<R: Read>(mut self, file: &mut R) -> Result<u64, Error> {
        std::io::copy(file, &mut self)?;
        Ok(self.hasher.finish())
    }
}

impl<T: Hasher> Write for FileHasher<T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        self.hasher.write(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Digest of a written file, used to compare outputs of different runs.
pub fn hash_file(path: &Path) -> Result<u64, Error> {
    let mut file = BufReader::new(File::open(path)?);
    FileHasher::new(XxHash64::with_seed(0)).hash(&mut file)
}
