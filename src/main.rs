// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thalassa CLI entrypoint.
//!
//! Runs the local diagram studio and serves the panel at
//! `http://127.0.0.1:<port>/`. An optional positional `.mmd` file is loaded
//! into the session at startup.

use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use thalassa::render::MermaidEngine;
use thalassa::session::SessionController;
use thalassa::store::{DiagramStore, WriteDurability};
use thalassa::templates::TemplateLibrary;
use thalassa::web::{self, DEFAULT_HTTP_PORT};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file.mmd>] [--port <port>] [--durable-writes]\n\nServes the diagram panel at `http://127.0.0.1:<port>/`.\n--port selects the port (0 = ephemeral; default {DEFAULT_HTTP_PORT}).\n\nIf <file.mmd> is given it is loaded into the session at startup; the session\nis otherwise empty. Nothing is persisted without an explicit save.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<String>,
    port: Option<u16>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "thalassa".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let store = if options.durable_writes {
            DiagramStore::new().with_durability(WriteDurability::Durable)
        } else {
            DiagramStore::new()
        };

        let mut session = SessionController::new(TemplateLibrary::builtin(), store);
        if let Some(file) = &options.file {
            session.load(Path::new(file))?;
        }

        let session = Arc::new(Mutex::new(session));
        let router = web::app(session, MermaidEngine::new());
        let port = options.port.unwrap_or(DEFAULT_HTTP_PORT);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
            let addr = listener.local_addr()?;
            eprintln!("thalassa: serving the diagram panel at http://{addr}/");

            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;

            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("thalassa: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_positional_file() {
        let options = parse_options(["lesson.mmd".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.file.as_deref(), Some("lesson.mmd"));
        assert_eq!(options.port, None);
        assert!(!options.durable_writes);
    }

    #[test]
    fn parses_port() {
        let options = parse_options(["--port".to_owned(), "1234".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.port, Some(1234));
    }

    #[test]
    fn parses_durable_writes_with_file_in_any_order() {
        let options = parse_options(
            ["--durable-writes".to_owned(), "lesson.mmd".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert!(options.durable_writes);
        assert_eq!(options.file.as_deref(), Some("lesson.mmd"));

        let options = parse_options(
            ["lesson.mmd".to_owned(), "--durable-writes".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert!(options.durable_writes);
        assert_eq!(options.file.as_deref(), Some("lesson.mmd"));
    }

    #[test]
    fn rejects_unknown_flags() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--durable-writes".to_owned(), "--durable-writes".to_owned()].into_iter())
            .unwrap_err();

        parse_options(
            ["--port".to_owned(), "1".to_owned(), "--port".to_owned(), "2".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_files() {
        parse_options(["one.mmd".to_owned(), "two.mmd".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_missing_port_value() {
        parse_options(["--port".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_non_numeric_port() {
        parse_options(["--port".to_owned(), "all".to_owned()].into_iter()).unwrap_err();
    }
}
