// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use ocm_addons::cli::output::report_error;
use ocm_addons::cli::CliArgs;
use ocm_addons::shared::logging;
use std::process::ExitCode;
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    logging::init(args.verbosity);

    tokio::select! {
        result = args.command.execute() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                let _ = report_error(&err, &mut std::io::stderr());
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted");
            ExitCode::from(130)
        }
    }
}
