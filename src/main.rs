//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use geosampler_service as service;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            timestamp,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn sample(args: &ArgMatches<'_>) {
    let config = service::config_from_args(args);
    let service = service::service_from_args(&config);
    match service.sample() {
        Ok(output) => {
            for layer in output.layers() {
                println!("{}: {} features", layer.name, layer.len());
            }
        }
        Err(err) => {
            error!("Sampling failed - {}", err);
            process::exit(1)
        }
    }
}

fn tile(args: &ArgMatches<'_>) {
    let config = service::config_from_args(args);
    let service = service::service_from_args(&config);
    if let Err(err) = service.tile() {
        error!("Tiling failed - {}", err);
        process::exit(1)
    }
}

fn main() {
    dotenv().ok();
    let mut app = App::new("geosampler")
        .version(crate_version!())
        .author("The geosampler developers")
        .about("tiling and spatial sampling of geographic extents")
        .subcommand(SubCommand::with_name("sample")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --seed=[NUM] 'Seed of the random number generator'
                                              --output=[PREFIX] 'Prefix of the written layers'")
                        .about("Tile the configured extent and write a sample"))
        .subcommand(SubCommand::with_name("tile")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --output=[PREFIX] 'Prefix of the written layers'")
                        .about("Write the tiling of the configured extent"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("sample", Some(sub_m)) => {
                init_logger(sub_m);
                sample(sub_m);
            }
            ("tile", Some(sub_m)) => {
                init_logger(sub_m);
                tile(sub_m);
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", service::gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
