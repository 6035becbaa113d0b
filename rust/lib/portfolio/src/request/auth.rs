//! Auth requests.

/// Exchange username and password for a credential.
#[derive(Clone)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/login";
}

impl std::fmt::Debug for LoginReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReq")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Drop the credential and return to the public page.
#[derive(Debug, Clone)]
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
