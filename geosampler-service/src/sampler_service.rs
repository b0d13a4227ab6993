//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use geosampler_core::core::config::{default_driver, ApplicationCfg, OutputCfg, SamplingCfg};
use geosampler_core::core::{Config, SamplerResult};
use geosampler_core::datasource;
use geosampler_core::sampling::{SampleOutput, Sampling};
use geosampler_core::tiler::TilingSource;

/// Output prefix used without `[output]` section
pub const DEFAULT_OUTPUT_PREFIX: &str = "sample";

/// Tiling and sampling run of an application configuration
#[derive(Clone)]
pub struct SamplerService {
    pub tiling: TilingSource,
    pub sampling_cfg: SamplingCfg,
    pub config: ApplicationCfg,
    pub output: OutputCfg,
}

impl SamplerService {
    /// Build the configured sampling
    pub fn sampling(&self) -> SamplerResult<Sampling> {
        Sampling::from_tiling(
            self.tiling.clone(),
            &self.sampling_cfg,
            self.config.mask.as_ref(),
        )
    }
    /// File name of the output layer `name`
    pub fn output_path(&self, name: &str) -> SamplerResult<String> {
        let writer = datasource::output(&self.output.driver)?;
        Ok(format!(
            "{}_{}.{}",
            self.output.path,
            name,
            writer.extension()
        ))
    }
    /// Run the sampling and write all result layers
    pub fn sample(&self) -> SamplerResult<SampleOutput> {
        let output = self.sampling()?.sample()?;
        if !output.target_reached() {
            warn!("Sampling target not reached, writing partial results");
        }
        for layer in output.layers() {
            let path = self.output_path(&layer.name)?;
            datasource::write_layer(layer, &path, Some(&self.output.driver))?;
            info!("Wrote {} features to '{}'", layer.len(), path);
        }
        Ok(output)
    }
    /// Write the tiling only
    pub fn tile(&self) -> SamplerResult<String> {
        let path = self.output_path("tiles")?;
        self.tiling.write(&path, Some(&self.output.driver))?;
        info!("Wrote tiles to '{}'", path);
        Ok(path)
    }
}

impl<'a> Config<'a, ApplicationCfg> for SamplerService {
    fn from_config(config: &ApplicationCfg) -> SamplerResult<Self> {
        let tiling = TilingSource::from_config(&config.tiler)?;
        let output = config.output.clone().unwrap_or_else(|| OutputCfg {
            path: DEFAULT_OUTPUT_PREFIX.to_string(),
            driver: default_driver(),
        });
        // fail on unsupported drivers before running
        datasource::output(&output.driver)?;
        Ok(SamplerService {
            tiling,
            sampling_cfg: config.sampling.clone().unwrap_or_default(),
            config: config.clone(),
            output,
        })
    }

    fn gen_config() -> String {
        let mut config = "# geosampler configuration\n".to_string();
        config.push_str(&TilingSource::gen_config());
        config.push_str(&Sampling::gen_config());
        config.push_str(
            r#"
[output]
# Prefix of the written layers <path>_<layer>.geojson
path = "sample"
driver = "GeoJSON"
"#,
        );
        config
    }
}
