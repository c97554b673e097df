use std::process::exit;
use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use face_aec::rockchip::{RkispControl, RkispExposure, RockfaceDetector};
use face_aec::{AecConfig, FaceAec};

/// Brings the detector up on its own thread; model loading takes seconds on
/// the target SoC and must not block ISP bring-up.
fn spawn_face_init(
    config: &AecConfig,
    tx: oneshot::Sender<Arc<FaceAec>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let data_path = config.data_path.clone();
    let policy = config.policy();
    thread::Builder::new()
        .name("face-init".into())
        .spawn(move || match RockfaceDetector::new(&data_path) {
            Ok(detector) => {
                let engine = Arc::new(FaceAec::new(
                    Box::new(detector),
                    Box::new(RkispExposure),
                    policy,
                ));
                engine.start();
                info!("face detection engine running");
                if tx.send(engine).is_err() {
                    warn!("main exited before face engine came up");
                }
            }
            Err(err) => {
                error!(error = %err, "face detector init failed");
            }
        })
}

fn spawn_isp_init(tx: oneshot::Sender<RkispControl>) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("isp-init".into())
        .spawn(move || match RkispControl::init() {
            Ok(control) => {
                info!("ISP control session running");
                if tx.send(control).is_err() {
                    warn!("main exited before ISP control came up");
                }
            }
            Err(err) => {
                error!(error = %err, "ISP control init failed");
            }
        })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AecConfig::default().validated();

    let (engine_tx, engine_rx) = oneshot::channel();
    let (isp_tx, isp_rx) = oneshot::channel();

    if let Err(err) = spawn_face_init(&config, engine_tx) {
        error!(error = %err, "failed to spawn face init thread");
        exit(-1);
    }
    if let Err(err) = spawn_isp_init(isp_tx) {
        error!(error = %err, "failed to spawn ISP init thread");
        exit(-1);
    }

    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to wait for shutdown signal");
    }
    info!("shutting down");

    // Either init may have failed; tear down whatever actually came up.
    if let Ok(engine) = engine_rx.await {
        engine.stop();
    }
    if let Ok(control) = isp_rx.await {
        control.exit();
    }
}
