use crate::{AudioCallback, Error, Result, StreamConfig, StreamFormat};

enum Never {}

pub(crate) struct PlatformStream(Never);

impl PlatformStream {
    pub fn open(_config: &StreamConfig, _callback: Box<dyn AudioCallback>) -> Result<Self> {
        Err(Error::Unsupported)
    }

    pub fn format(&self) -> StreamFormat {
        match self.0 {}
    }

    pub fn start(&mut self) -> Result<()> {
        match self.0 {}
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.0 {}
    }
}
