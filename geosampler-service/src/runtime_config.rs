//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::sampler_service::SamplerService;
use clap::ArgMatches;
use geosampler_core::core::config::{default_driver, ApplicationCfg, OutputCfg, DEFAULT_CONFIG};
use geosampler_core::core::{parse_config, read_config, Config};
use std::process;
use std::str::FromStr;

/// Apply command line overrides to `config`
pub fn apply_args(config: &mut ApplicationCfg, args: &ArgMatches) -> Result<(), String> {
    if let Some(seed) = args.value_of("seed") {
        let seed = u64::from_str(seed).map_err(|_| format!("Invalid seed '{}'", seed))?;
        config.sampling.get_or_insert_with(Default::default).seed = Some(seed);
    }
    if let Some(prefix) = args.value_of("output") {
        match config.output {
            Some(ref mut output) => output.path = prefix.to_string(),
            None => {
                config.output = Some(OutputCfg {
                    path: prefix.to_string(),
                    driver: default_driver(),
                })
            }
        }
    }
    Ok(())
}

pub fn config_from_args(args: &ArgMatches) -> ApplicationCfg {
    let mut config = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        read_config(cfgpath).unwrap_or_else(|err| {
            println!("Error reading configuration - {} ", err);
            process::exit(1)
        })
    } else {
        info!("No configuration given, using built-in defaults");
        parse_config(DEFAULT_CONFIG.to_string(), "").unwrap_or_else(|err| {
            println!("Error reading configuration - {} ", err);
            process::exit(1)
        })
    };
    if let Err(err) = apply_args(&mut config, args) {
        println!("{}", err);
        process::exit(1)
    }
    config
}

pub fn service_from_args(config: &ApplicationCfg) -> SamplerService {
    SamplerService::from_config(config).unwrap_or_else(|err| {
        println!("Error reading configuration - {} ", err);
        process::exit(1)
    })
}

pub fn gen_config() -> String {
    SamplerService::gen_config()
}

#[test]
fn test_gen_config() {
    let toml = gen_config();
    println!("{}", toml);
    assert_eq!(Some("# geosampler configuration"), toml.lines().next());

    let config = parse_config(toml, "").unwrap();
    let service = SamplerService::from_config(&config).unwrap();
    assert_eq!(service.sampling_cfg.method, "systematic");
    assert_eq!(service.output.path, "sample");
    assert_eq!(service.sampling().unwrap().tiles().len(), 256);
}

#[test]
fn test_args() {
    use clap::App;

    let app = App::new("test").args_from_usage(
        "-c, --config=[FILE] 'Load from custom config file'
         --seed=[NUM] 'Random seed'
         --output=[PREFIX] 'Output file prefix'",
    );
    let args = app
        .clone()
        .get_matches_from(vec!["", "--seed", "42", "--output", "/tmp/run"]);
    let config = config_from_args(&args);
    assert_eq!(config.sampling.unwrap().seed, Some(42));
    assert_eq!(config.output.unwrap().path, "/tmp/run");

    let args = app.get_matches_from(vec!["", "--seed", "many"]);
    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    assert!(apply_args(&mut config, &args).is_err());
}
