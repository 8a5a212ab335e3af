use std::sync::Arc;

use crate::adapters::toml_config::AppConfig;
use crate::adapters::{FFmpegAdapter, FFprobeAdapter};
use crate::app::locks::OutputLocks;
use crate::app::{concat_interactor::ConcatInteractor, inspect_interactor::InspectInteractor};
use crate::error::ChapcatResult;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn concat_interactor(&self) -> Arc<ConcatInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    concat_interactor: Arc<ConcatInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the ffprobe/ffmpeg adapters described by `config`
    pub fn new(config: &AppConfig) -> ChapcatResult<Self> {
        let probe_port = Arc::new(FFprobeAdapter::new(
            config.ffprobe.binary.clone(),
            config.ffprobe.timeout(),
        ));
        let execute_port = Arc::new(FFmpegAdapter::new(
            config.ffmpeg.binary.clone(),
            config.ffmpeg.timeout(),
            config.timebase()?,
        ));

        Ok(Self::with_ports(probe_port, execute_port, config))
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        config: &AppConfig,
    ) -> Self {
        let concat_interactor = Arc::new(ConcatInteractor::new(
            probe_port,
            execute_port,
            OutputLocks::new(),
            config.probe_settings(),
        ));
        let inspect_interactor = Arc::new(InspectInteractor::new(Arc::clone(&concat_interactor)));

        Self {
            concat_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn concat_interactor(&self) -> Arc<ConcatInteractor> {
        Arc::clone(&self.concat_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
