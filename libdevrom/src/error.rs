extern crate miette;
extern crate thiserror;

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum MaskError {
    #[error("failed to read ROM image {path:?}")]
    #[diagnostic(code(libdevrom::source_read_error))]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write masked image {path:?}")]
    #[diagnostic(code(libdevrom::destination_write_error))]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
