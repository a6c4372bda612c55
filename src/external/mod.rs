//! Adapters for the external tools the pipeline drives.
//!
//! The rasterizer and terminal encoders are traits so the pipeline can be
//! exercised without Ghostscript or a sixel terminal.

mod encoder;
mod probe;
mod process;
mod rasterizer;
mod workspace;

pub use encoder::{select_encoder, Ansi, Sixel, TerminalEncoder};
pub use probe::{parse_probe_output, probe_terminal, TerminalColours};
pub use process::{interrupted, setup_interrupt_handler, StdoutMode, ToolCommand, ToolOutput};
pub use rasterizer::{write_document, Ghostscript, Rasterizer, DOCUMENT_FILE};
pub use workspace::Workspace;
