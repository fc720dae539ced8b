// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Serves the diagram tools (`render`, `validate`, `format`, `list-themes`,
//! `list-layouts`) over MCP on stdio. Compiler warm-up runs in the background
//! unless `--no-warm-up` is given.

use std::error::Error;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--no-warm-up]\n\nServes the Proteus diagram tools over MCP on stdio.\n\n--no-warm-up skips the background compiler warm-up (the first render pays the\ninitialization cost instead).\n\nThe `format` tool shells out to the d2 executable; set D2_BIN to override the\npath it resolves."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    no_warm_up: bool,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--no-warm-up" => {
                if options.no_warm_up {
                    return Err(());
                }
                options.no_warm_up = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let mcp = proteus::mcp::ProteusMcp::new();
            if !options.no_warm_up {
                mcp.spawn_warm_up();
            }
            mcp.serve_stdio().await
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("proteus: {err}");
        std::process::exit(1);
    }
}
