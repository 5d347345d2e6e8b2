//! Dispatch of the generation jobs, either on a worker pool or on the calling thread.
//!
//! Every job owns its scene from construction to serialization: jobs share nothing but the output
//! directory, where each one writes distinct files. A failing or panicking job is reported and
//! never stops its siblings.
use crate::config::{GeneratorConfig, Selection};
use crate::error::{Error, Result};
use crate::graph::SceneConverter;
use crate::images::texture_set;
use crate::presets::{Preset, SceneKind};
use crate::writer::{write_scene_files, write_texture};
use log::{error, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// Unit of work of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    /// Builds, converts and writes a single scene.
    Scene(SceneKind),
    /// Writes the procedural textures and the sky maps.
    Textures,
}

impl Job {
    pub fn name(&self) -> String {
        match self {
            Job::Scene(kind) => kind.name(),
            Job::Textures => Preset::Textures.name(),
        }
    }

    /// Runs the job, returning the written files.
    ///
    /// Without `parallel` the job never leaves the calling thread.
    pub fn run(&self, dir: &Path, parallel: bool) -> Result<Vec<PathBuf>> {
        match self {
            Job::Scene(kind) => generate_scene(dir, kind),
            Job::Textures => generate_textures(dir, parallel),
        }
    }
}

/// Jobs of the selected presets, in generation order.
pub fn jobs(selection: &Selection) -> Vec<Job> {
    selection
        .presets()
        .into_iter()
        .flat_map(|preset| match preset {
            Preset::Textures => vec![Job::Textures],
            _ => preset.scenes().into_iter().map(Job::Scene).collect(),
        })
        .collect()
}

/// Builds the scene of `kind` and writes both its flat and node graph files in `dir`.
///
/// The node graph is converted before flattening, so it keeps the instancing.
pub fn generate_scene(dir: &Path, kind: &SceneKind) -> Result<Vec<PathBuf>> {
    let mut scene = kind.build()?;
    let graph = SceneConverter::new()
        .with_nodes(kind.with_nodes())
        .convert(&scene)?;
    if !kind.keeps_instances() {
        scene.flatten_instances()?;
    }
    write_scene_files(dir, &kind.name(), &scene, &graph)
}

pub fn generate_textures(dir: &Path, parallel: bool) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (name, data) in texture_set(parallel) {
        let path = dir.join(name);
        write_texture(&path, &data)?;
        written.push(path);
    }
    Ok(written)
}

/// Outcome of a batch. Jobs appear in generation order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `f`, turning a panic into [Error::Panic].
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(Error::Panic(panic_message(payload))))
}

fn run_job(
    job: &Job,
    dir: &Path,
    parallel: bool,
    progress: &(dyn Fn(&str) + Sync),
) -> (String, Result<()>) {
    let name = job.name();
    info!("Generating {name}");
    let start = Instant::now();
    let result = guarded(|| job.run(dir, parallel)).map(|written| {
        info!(
            "Generated {name}: {} files in {} ms",
            written.len(),
            start.elapsed().as_millis()
        );
    });
    if let Err(e) = &result {
        error!("Failed to generate {name}: {e}");
    }
    progress(&name);
    (name, result)
}

/// Runs `jobs`, concurrently if `parallel` is set, and waits for all of them.
pub fn run_jobs(
    jobs: &[Job],
    dir: &Path,
    parallel: bool,
    progress: &(dyn Fn(&str) + Sync),
) -> Result<BatchReport> {
    let results = if parallel {
        let threads = thread::available_parallelism().map_or(1, |n| n.get());
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        pool.install(|| {
            jobs.par_iter()
                .map(|job| run_job(job, dir, true, progress))
                .collect::<Vec<_>>()
        })
    } else {
        jobs.iter()
            .map(|job| run_job(job, dir, false, progress))
            .collect::<Vec<_>>()
    };
    let mut report = BatchReport::default();
    for (name, result) in results {
        match result {
            Ok(()) => report.succeeded.push(name),
            Err(e) => report.failed.push((name, e)),
        }
    }
    Ok(report)
}

/// Creates the output directory and runs every job selected by `config`.
///
/// `progress` is invoked with the name of each finished job, possibly from several threads.
/// Only a failure in setting up the batch is returned as error: job failures end up in the
/// report.
pub fn run_batch(
    config: &GeneratorConfig,
    progress: &(dyn Fn(&str) + Sync),
) -> Result<BatchReport> {
    fs::create_dir_all(&config.output_dir)?;
    let jobs = jobs(&config.selection);
    info!(
        "Running {} jobs in {}",
        jobs.len(),
        config.output_dir.display()
    );
    run_jobs(&jobs, &config.output_dir, config.parallel, progress)
}

#[cfg(test)]
mod tests {
    use super::{guarded, jobs, run_batch, run_jobs, Job};
    use crate::config::{GeneratorConfig, Selection};
    use crate::error::Error;
    use crate::presets::{InstanceCount, Lighting, MeshKind, Preset, SceneKind, SimpleKind};
    use crate::writer::hash_file;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn digests(dir: &Path) -> BTreeMap<String, u64> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                let name = path.file_name().unwrap().to_string_lossy().to_string();
                (name, hash_file(&path).unwrap())
            })
            .collect()
    }

    #[test]
    fn job_list() {
        let all = jobs(&Selection::All);
        assert_eq!(all[0], Job::Scene(SceneKind::Mesh(MeshKind::Cube)));
        assert_eq!(all.last(), Some(&Job::Textures));
        // three lightings for simple, instance and matball presets
        assert_eq!(all.len(), 2 + 3 * (13 + 4 + 20) + 1 + 2 + 1);
        let rigid = jobs(&Selection::Only(Preset::Rigid));
        assert_eq!(rigid.len(), 2);
        assert_eq!(rigid[1].name(), "rigid_slanted_pointlight");
    }

    #[test]
    fn sequential_and_parallel_match() {
        init_logs();
        let selected = [
            Job::Scene(SceneKind::Simple(SimpleKind::Basic, Lighting::Area)),
            Job::Scene(SceneKind::Simple(SimpleKind::Points, Lighting::Point)),
            Job::Scene(SceneKind::Simple(SimpleKind::Lines, Lighting::Point)),
            Job::Scene(SceneKind::Simple(SimpleKind::Hair, Lighting::Env)),
            Job::Scene(SceneKind::Instances(InstanceCount::I100, Lighting::Point)),
            Job::Scene(SceneKind::CornellBox),
            Job::Scene(SceneKind::Mesh(MeshKind::Cube)),
            Job::Textures,
        ];
        let sequential = tempdir().unwrap();
        let parallel = tempdir().unwrap();
        let finished = AtomicUsize::new(0);
        let progress = |_: &str| {
            finished.fetch_add(1, Ordering::Relaxed);
        };
        let a = run_jobs(&selected, sequential.path(), false, &progress).unwrap();
        let b = run_jobs(&selected, parallel.path(), true, &progress).unwrap();
        assert!(a.is_success() && b.is_success());
        assert_eq!(a.succeeded, b.succeeded);
        assert_eq!(finished.load(Ordering::Relaxed), 2 * selected.len());
        let expected = digests(sequential.path());
        // obj, mtl, gltf and bin per scene, plus the texture set
        assert_eq!(expected.len(), 7 * 4 + 11);
        assert!(expected.contains_key("cornell_box.gltf"));
        assert!(expected.contains_key("mesh_cube.bin"));
        assert!(expected.contains_key("hair_envlight.obj"));
        assert!(expected.contains_key("instance100_pointlight.bin"));
        assert!(expected.contains_key("env.hdr"));
        assert_eq!(expected, digests(parallel.path()));
    }

    #[test]
    fn panics_are_reported() {
        let result = guarded::<()>(|| panic!("boom"));
        assert!(matches!(result, Err(Error::Panic(msg)) if msg == "boom"));
        let formatted = guarded::<()>(|| panic!("{} failed", "job"));
        assert!(matches!(formatted, Err(Error::Panic(msg)) if msg == "job failed"));
    }

    #[test]
    fn unwritable_output() {
        init_logs();
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        let config = GeneratorConfig {
            output_dir: file.join("out"),
            parallel: false,
            selection: Selection::Only(Preset::CornellBox),
        };
        assert!(matches!(run_batch(&config, &|_| ()), Err(Error::Io(_))));
    }

    #[test]
    fn failed_jobs_do_not_stop_the_batch() {
        init_logs();
        let dir = tempdir().unwrap();
        let selected = [
            Job::Scene(SceneKind::CornellBox),
            Job::Scene(SceneKind::Mesh(MeshKind::Sphere)),
        ];
        // a directory in place of an output file makes the first job fail
        fs::create_dir(dir.path().join("cornell_box.mtl")).unwrap();
        let report = run_jobs(&selected, dir.path(), true, &|_| ()).unwrap();
        assert_eq!(report.succeeded, vec!["mesh_sphere"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "cornell_box");
        assert!(matches!(report.failed[0].1, Error::Io(_)));
    }
}
