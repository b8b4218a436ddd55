// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use classdrop_evm::Network;
use classdrop_logging::{LogFormat, LogOutputDest};
use clap::Parser;
use std::str::FromStr;

use crate::commands::SubCmd;

// Please do not remove the blank lines in these doc comments.
// They are used for inserting line breaks when the help menu is rendered in the UI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// Specify the logging output destination.
    ///
    /// Valid values are "stdout", "stderr", "data-dir", or a custom path.
    ///
    /// `data-dir` is the default value.
    ///
    /// The data directory location is platform specific:
    ///  - Linux: $HOME/.local/share/classdrop/client/logs
    ///  - macOS: $HOME/Library/Application Support/classdrop/client/logs
    ///  - Windows: C:\Users\<username>\AppData\Roaming\classdrop\client\logs
    #[allow(rustdoc::invalid_html_tags)]
    #[clap(long, value_parser = LogOutputDest::parse_from_str, verbatim_doc_comment, default_value = "data-dir")]
    pub log_output_dest: LogOutputDest,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    ///
    /// If the argument is not used, the default format will be applied.
    #[clap(long, value_parser = LogFormat::parse_from_str, verbatim_doc_comment)]
    pub log_format: Option<LogFormat>,

    /// Specify the maximum number of uncompressed log files to store.
    ///
    /// This argument is ignored if `log_output_dest` is set to "stdout" or "stderr".
    ///
    /// After reaching this limit, the older files are archived to save space.
    /// You can also specify the maximum number of archived log files to keep.
    #[clap(long, verbatim_doc_comment)]
    pub max_log_files: Option<usize>,

    /// Specify the maximum number of archived log files to store.
    ///
    /// This argument is ignored if `log_output_dest` is set to "stdout" or "stderr".
    ///
    /// After reaching this limit, the older archived files are deleted.
    #[clap(long, verbatim_doc_comment)]
    pub max_archived_log_files: Option<usize>,

    /// The network to use.
    ///
    /// Valid values are "base-sepolia", "base", "ethereum", "sepolia" or "hardhat".
    ///
    /// Overrides the EVM_NETWORK env var. Without either, RPC_URL selects a custom network,
    /// otherwise Base Sepolia is used.
    #[clap(long, global = true, value_parser = Network::from_str, verbatim_doc_comment)]
    pub network: Option<Network>,

    /// The token contract to send from. Overrides the TOKEN_CONTRACT_ADDRESS env var.
    #[clap(long, global = true)]
    pub token: Option<String>,

    /// Available sub commands.
    #[clap(subcommand)]
    pub command: SubCmd,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{RecipientArgs, SubCmd};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Opt::command().debug_assert();
    }

    #[test]
    fn send_takes_repeated_recipients() -> eyre::Result<()> {
        let opt = Opt::try_parse_from([
            "classdrop",
            "--network",
            "hardhat",
            "send",
            "--amount",
            "1.5",
            "--to",
            "0x0000000000000000000000000000000000000001",
            "--to",
            "0x0000000000000000000000000000000000000002",
            "--dry-run",
        ])?;

        assert_eq!(opt.network, Some(Network::Hardhat));
        match opt.command {
            SubCmd::Send {
                amount,
                recipients: RecipientArgs { to, bulk, bulk_file },
                dry_run,
                strict_addresses,
            } => {
                assert_eq!(amount, "1.5");
                assert_eq!(to.len(), 2);
                assert!(bulk.is_none() && bulk_file.is_none());
                assert!(dry_run);
                assert!(!strict_addresses);
            }
            _ => panic!("expected the send command"),
        }
        Ok(())
    }

    #[test]
    fn send_needs_exactly_one_recipient_source() {
        assert!(Opt::try_parse_from(["classdrop", "send", "--amount", "1"]).is_err());
        assert!(Opt::try_parse_from([
            "classdrop",
            "send",
            "--amount",
            "1",
            "--to",
            "0x0000000000000000000000000000000000000001",
            "--bulk",
            "0x0000000000000000000000000000000000000002",
        ])
        .is_err());
    }

    #[test]
    fn logs_go_to_the_data_dir_by_default() -> eyre::Result<()> {
        let opt = Opt::try_parse_from(["classdrop", "network", "status"])?;
        assert!(matches!(opt.log_output_dest, LogOutputDest::Path(_)));
        assert_eq!(opt.max_log_files, None);

        let opt = Opt::try_parse_from([
            "classdrop",
            "--log-output-dest",
            "stderr",
            "--max-log-files",
            "3",
            "--max-archived-log-files",
            "5",
            "network",
            "status",
        ])?;
        assert_eq!(opt.log_output_dest, LogOutputDest::Stderr);
        assert_eq!(opt.max_log_files, Some(3));
        assert_eq!(opt.max_archived_log_files, Some(5));
        Ok(())
    }

    #[test]
    fn unknown_network_is_rejected() {
        assert!(Opt::try_parse_from(["classdrop", "--network", "moon", "network", "status"]).is_err());
    }
}
