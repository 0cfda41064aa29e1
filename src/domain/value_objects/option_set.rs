//! Option set value objects
//!
//! Closed vocabularies used in the project configuration. Each set supports
//! case-insensitive lookup by value and converts back to its canonical string.

use serde::Deserialize;

/// A closed, string-valued vocabulary
pub trait OptionSet: Sized + Copy + 'static {
    /// Name used in error messages (e.g. "database engine")
    const KIND: &'static str;

    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Canonical string value
    fn as_str(&self) -> &'static str;

    /// Look up a member by value, ignoring ASCII case
    fn lookup(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(value))
    }

    /// All canonical values
    fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.as_str()).collect()
    }
}

/// Error for a value outside an option set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

impl std::fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown {} '{}' (expected one of: {})",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownOption {}

fn parse_option<T: OptionSet>(value: &str) -> Result<T, UnknownOption> {
    T::lookup(value).ok_or_else(|| UnknownOption {
        kind: T::KIND,
        value: value.to_string(),
        expected: T::values(),
    })
}

/// Server operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerOs {
    UbuntuXenial,
    UbuntuBionic,
    UbuntuFocal,
    UbuntuJammy,
    Centos7,
    Centos8,
}

impl OptionSet for ServerOs {
    const KIND: &'static str = "server OS";
    const ALL: &'static [Self] = &[
        ServerOs::UbuntuXenial,
        ServerOs::UbuntuBionic,
        ServerOs::UbuntuFocal,
        ServerOs::UbuntuJammy,
        ServerOs::Centos7,
        ServerOs::Centos8,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ServerOs::UbuntuXenial => "ubuntu_xenial",
            ServerOs::UbuntuBionic => "ubuntu_bionic",
            ServerOs::UbuntuFocal => "ubuntu_focal",
            ServerOs::UbuntuJammy => "ubuntu_jammy",
            ServerOs::Centos7 => "centos_7",
            ServerOs::Centos8 => "centos_8",
        }
    }
}

impl ServerOs {
    /// Map an `lsb_release -sc` codename to a known OS
    pub fn from_codename(codename: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|os| os.codename().eq_ignore_ascii_case(codename.trim()))
    }

    /// Distribution codename (the key of the bundled package lists)
    pub fn codename(&self) -> &'static str {
        match self {
            ServerOs::UbuntuXenial => "xenial",
            ServerOs::UbuntuBionic => "bionic",
            ServerOs::UbuntuFocal => "focal",
            ServerOs::UbuntuJammy => "jammy",
            ServerOs::Centos7 => "7",
            ServerOs::Centos8 => "8",
        }
    }
}

/// How the application runs on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Deployment {
    Docker,
    #[default]
    Virtualenv,
}

impl OptionSet for Deployment {
    const KIND: &'static str = "deployment";
    const ALL: &'static [Self] = &[Deployment::Docker, Deployment::Virtualenv];

    fn as_str(&self) -> &'static str {
        match self {
            Deployment::Docker => "docker",
            Deployment::Virtualenv => "virtualenv",
        }
    }
}

/// Front web server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum WebServer {
    #[default]
    Nginx,
    Apache,
}

impl OptionSet for WebServer {
    const KIND: &'static str = "web server";
    const ALL: &'static [Self] = &[WebServer::Nginx, WebServer::Apache];

    fn as_str(&self) -> &'static str {
        match self {
            WebServer::Nginx => "nginx",
            WebServer::Apache => "apache",
        }
    }
}

impl WebServer {
    /// Name of the system service (`service <name> restart`)
    pub fn service_name(&self) -> &'static str {
        match self {
            WebServer::Nginx => "nginx",
            WebServer::Apache => "apache2",
        }
    }

    /// OS package providing the server
    pub fn package(&self) -> &'static str {
        match self {
            WebServer::Nginx => "nginx",
            WebServer::Apache => "apache2",
        }
    }
}

/// Database engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Database {
    Mysql,
    #[default]
    Postgres,
    Sqlite,
    Mongodb,
}

impl OptionSet for Database {
    const KIND: &'static str = "database engine";
    const ALL: &'static [Self] = &[
        Database::Mysql,
        Database::Postgres,
        Database::Sqlite,
        Database::Mongodb,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Database::Mysql => "mysql",
            Database::Postgres => "postgres",
            Database::Sqlite => "sqlite",
            Database::Mongodb => "mongodb",
        }
    }
}

impl Database {
    /// Server and client library packages for this engine
    pub fn packages(&self) -> &'static [&'static str] {
        match self {
            Database::Postgres => &["postgresql", "postgresql-contrib", "libpq-dev"],
            Database::Mysql => &["mysql-server", "libmysqlclient-dev"],
            Database::Sqlite | Database::Mongodb => &[],
        }
    }
}

macro_rules! impl_option_conversions {
    ($($ty:ty),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $ty {
                type Err = UnknownOption;

                fn from_str(value: &str) -> Result<Self, Self::Err> {
                    parse_option(value)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = UnknownOption;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    parse_option(&value)
                }
            }
        )+
    };
}

impl_option_conversions!(ServerOs, Deployment, WebServer, Database);
