// Buffer related constants
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

// Location scheme used when rendering object storage keys
pub const S3_SCHEME: &str = "s3://";
