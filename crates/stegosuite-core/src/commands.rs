use std::path::{Path, PathBuf};

use crate::api::capacity::Capacity;
use crate::api::hide::Hidden;
use crate::api::unveil::Revealed;
use crate::{CodecOptions, Method, SteganoError};

pub fn hide(
    method: Method,
    media: &Path,
    write_to_file: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    artifact: Option<PathBuf>,
    options: CodecOptions,
) -> Result<Hidden, SteganoError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_method(method)
        .with_image(media)
        .with_output(write_to_file)
        .use_message(message)
        .use_message_file(message_file)
        .use_artifact(artifact)
        .execute()
}

pub fn unveil(
    method: Method,
    secret_media: &Path,
    artifact: Option<PathBuf>,
    restored_output: Option<PathBuf>,
    options: CodecOptions,
) -> Result<Revealed, SteganoError> {
    crate::api::unveil::prepare()
        .with_options(options)
        .with_method(method)
        .from_secret_file(secret_media)
        .use_artifact(artifact)
        .use_restored_output(restored_output)
        .execute()
}

pub fn capacity(
    method: Method,
    media: &Path,
    options: CodecOptions,
) -> Result<Capacity, SteganoError> {
    crate::api::capacity::prepare()
        .with_options(options)
        .with_method(method)
        .with_image(media)
        .execute()
}
