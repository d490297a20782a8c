use anyhow::Result;
use roomjwt::kubectl::KubectlConfig;
use roomjwt::{IssuerProfile, SecretRef};
use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// Config to be read from file
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub secret: SecretRef,
    #[serde(default)]
    pub kubectl: KubectlConfig,
    #[serde(default)]
    pub profile: IssuerProfile,
}

impl Config {
    /// Layered the usual way: `tokengen.*`, then `tokengen.local.*`, then `TOKENGEN__*` env vars.
    pub fn load() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name("tokengen").required(false))
            .add_source(config::File::with_name("tokengen.local").required(false))
            .add_source(config::Environment::with_prefix("TOKENGEN").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(cfg)
    }
}

//--------------------------------------------------------------------------------------------------
