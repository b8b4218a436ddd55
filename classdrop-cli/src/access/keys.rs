// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_evm::wallet::Wallet;
use classdrop_evm::Deployment;
use color_eyre::eyre::{bail, Context, Result};
use color_eyre::Section;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SECRET_KEY_ENV: &str = "SECRET_KEY";
const SECRET_KEY_FILE: &str = "secret_key";

/// EVM wallet able to sign on the deployment's network
pub fn load_evm_wallet(deployment: Deployment) -> Result<Wallet> {
    let secret_key =
        get_secret_key().wrap_err("The secret key is required to perform this action")?;
    let wallet = Wallet::new_from_private_key(deployment, &secret_key)
        .wrap_err("Failed to load EVM wallet from key")
        .with_suggestion(|| "the secret key should be a hex encoded string of your evm wallet private key")?;
    Ok(wallet)
}

/// EVM wallet private key
pub fn get_secret_key() -> Result<String> {
    // try env var first
    let why_env_failed = match env::var(SECRET_KEY_ENV) {
        Ok(key) => return Ok(key.trim().to_string()),
        Err(e) => e,
    };

    // try from data dir
    let dir = super::data_dir::get_client_data_dir_path()
        .wrap_err(format!("Failed to obtain secret key from env var: {why_env_failed}, reading from disk also failed as couldn't access data dir"))
        .with_suggestion(|| format!("make sure you've provided the {SECRET_KEY_ENV} env var"))?;

    read_secret_key(&dir.join(SECRET_KEY_FILE))
}

fn read_secret_key(key_path: &Path) -> Result<String> {
    fs::read_to_string(key_path)
        .map(|key| key.trim().to_string())
        .wrap_err("Failed to read secret key from file")
        .with_suggestion(|| format!("make sure you've provided the {SECRET_KEY_ENV} env var or have the key in a file at {key_path:?}"))
        .with_suggestion(|| "you can create a new key with `wallet create --save`")
}

/// Store the private key in the data dir, never replacing an existing one.
pub fn store_secret_key(secret_key: &str) -> Result<PathBuf> {
    let dir = super::data_dir::get_client_data_dir_path()
        .wrap_err("Could not access directory to write key to")?;
    let file_path = dir.join(SECRET_KEY_FILE);
    write_secret_key(&file_path, secret_key)?;
    Ok(file_path)
}

fn write_secret_key(file_path: &Path, secret_key: &str) -> Result<()> {
    if file_path.exists() {
        bail!("A secret key is already stored at {file_path:?}");
    }
    fs::write(file_path, secret_key).wrap_err("Could not write key to file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_key_is_read_back_trimmed() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let key_path = dir.path().join(SECRET_KEY_FILE);

        write_secret_key(&key_path, "0xabc\n")?;
        assert_eq!(read_secret_key(&key_path)?, "0xabc");
        Ok(())
    }

    #[test]
    fn existing_key_is_never_overwritten() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let key_path = dir.path().join(SECRET_KEY_FILE);

        write_secret_key(&key_path, "0xabc")?;
        assert!(write_secret_key(&key_path, "0xdef").is_err());
        assert_eq!(read_secret_key(&key_path)?, "0xabc");
        Ok(())
    }

    #[test]
    fn missing_key_file_is_an_error() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(read_secret_key(&dir.path().join(SECRET_KEY_FILE)).is_err());
        Ok(())
    }
}
