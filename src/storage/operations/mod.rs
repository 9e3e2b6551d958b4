// Storage operation traits and implementations
pub mod delete;
pub mod download;
pub mod list;
pub mod mkdir;
pub mod upload;

pub use delete::Deleter;
pub use download::Downloader;
pub use list::Lister;
pub use mkdir::Mkdirer;
pub use upload::Uploader;

/// How a backend organizes its keys.
///
/// Object stores are `Flat`: a listing matches every key under a prefix and a
/// missing key is not an error. File-sync stores are `Hierarchical`: a listing
/// returns immediate children and a missing path is `RemoteNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Flat,
    Hierarchical,
}
