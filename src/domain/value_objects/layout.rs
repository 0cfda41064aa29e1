//! Fixed names shared by every project on a host

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "django.json";

/// Parent directory of every project tree
pub const HOME_BASE_PATH: &str = "/srv";

/// OS group shared by all project users on a host
pub const SHARED_GROUP: &str = "workload";

/// Fallback contact address for certificate registration
pub const DEFAULT_EMAIL: &str = "team@xiberty.com";

/// Fallback SSH key location
pub const DEFAULT_SSH_KEY: &str = "~/.ssh/id_rsa.pub";

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// Local git remote that points at the server repository
pub const GIT_REMOTE: &str = "production";

/// Where certificate renewal scripts are installed
pub const LETSENCRYPT_FOLDER: &str = "/opt/letsencrypt";
