pub mod fixtures;
mod layout_files;
mod verification;
mod workspace_files;

use anyhow::Result;
use qcw_types::error::{format_error, FormatError};

pub fn expect_format_error<T>(res: Result<T>) -> FormatError {
    match res {
        Ok(_) => panic!("decode should fail"),
        Err(err) => format_error(&err)
            .unwrap_or_else(|| panic!("not a FormatError: {err:?}"))
            .clone(),
    }
}
