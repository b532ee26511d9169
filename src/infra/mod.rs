//! Loading the commission dataset from embedded assets or files on disk.

pub mod commission_csv;
pub mod dataset;
