//! Upload requests.

use folio_client::PhotoFile;

#[derive(Debug, Clone)]
pub struct UploadPhotoReq {
    pub photo: PhotoFile,
}

impl UploadPhotoReq {
    pub const PATH: &'static str = "upload/photo";
}
