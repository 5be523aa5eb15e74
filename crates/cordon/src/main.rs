use clap::{Parser, Subcommand, ValueEnum};
use cordon_core::{load_objects, Node, Pod, Resource};
use cordon_scheduler::{
    FilterReport, Framework, FrameworkConfig, Handle, NodeInfo, Registry, SchedulerError,
    SnapshotHandle,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cordon", about = "Evaluate Pod admission against candidate Nodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the filter stage for one pod against a set of nodes
    Filter {
        /// Pod manifest (YAML or JSON)
        #[arg(long)]
        pod: PathBuf,
        /// Node manifests; each may hold several nodes
        #[arg(long, required = true, num_args = 1..)]
        nodes: Vec<PathBuf>,
        /// Manifests of pods already bound to the nodes (spec.nodeName)
        #[arg(long, num_args = 1..)]
        placed: Vec<PathBuf>,
        /// Framework configuration file
        #[arg(long, env = "CORDON_CONFIG")]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Output::Table)]
        output: Output,
    },
    /// List registered filter plugins in default order
    Plugins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Table,
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            pod,
            nodes,
            placed,
            config,
            output,
        } => run_filter(&pod, &nodes, &placed, config.as_deref(), output).await,
        Commands::Plugins => {
            for name in Registry::in_tree().names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Load inputs, run the filter pass and print the report
async fn run_filter(
    pod_path: &Path,
    node_paths: &[PathBuf],
    placed_paths: &[PathBuf],
    config_path: Option<&Path>,
    output: Output,
) -> miette::Result<()> {
    let config = match config_path {
        Some(path) => FrameworkConfig::load(path)?,
        None => FrameworkConfig::default(),
    };

    let pod = load_pod(pod_path)?;
    let snapshot = load_snapshot(node_paths, placed_paths)?;
    let pod_name = pod.name_or_unknown().to_string();

    info!(
        "Filtering pod {} against {} nodes",
        pod_name,
        snapshot.len()
    );

    let handle = Arc::new(SnapshotHandle::new(snapshot));
    let framework = Arc::new(Framework::new(
        &Registry::in_tree(),
        &config,
        handle.clone(),
    )?);

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling filter pass");
            signal_token.cancel();
        }
    });

    let nodes: Arc<[NodeInfo]> = Arc::from(handle.node_infos());
    let report = framework
        .find_feasible_nodes_concurrent(Arc::new(pod), nodes, token)
        .await?;

    println!("{}", render(&report, output)?);

    if !report.has_feasible() {
        return Err(SchedulerError::no_suitable_nodes(pod_name, report.summary()).into());
    }

    Ok(())
}

/// Load exactly one pod from a manifest
fn load_pod(path: &Path) -> miette::Result<Pod> {
    let mut pods: Vec<Pod> = load_objects(path)?;
    match pods.len() {
        1 => Ok(pods.remove(0)),
        n => Err(miette::miette!(
            "Expected exactly one Pod in '{}', found {}",
            path.display(),
            n
        )),
    }
}

/// Build one snapshot per node, accounting already-placed pods
fn load_snapshot(node_paths: &[PathBuf], placed_paths: &[PathBuf]) -> miette::Result<Vec<NodeInfo>> {
    let mut snapshot = Vec::new();
    for path in node_paths {
        for node in load_objects::<Node>(path)? {
            node.validate().map_err(|e| {
                miette::miette!("Invalid node in '{}': {}", path.display(), e)
            })?;
            snapshot.push(NodeInfo::from_node(node));
        }
    }

    for path in placed_paths {
        for pod in load_objects::<Pod>(path)? {
            let Some(node_name) = pod.spec.as_ref().and_then(|s| s.node_name.clone()) else {
                warn!(
                    "Skipping placed pod {} without spec.nodeName",
                    pod.name_or_unknown()
                );
                continue;
            };

            match snapshot.iter_mut().find(|info| info.node_name() == node_name) {
                Some(info) => info.add_pod(pod)?,
                None => warn!(
                    "Skipping placed pod {}: node {} not in snapshot",
                    pod.name_or_unknown(),
                    node_name
                ),
            }
        }
    }

    Ok(snapshot)
}

fn render(report: &FilterReport, output: Output) -> miette::Result<String> {
    let rendered = match output {
        Output::Json => cordon_core::to_json_pretty(report)?,
        Output::Yaml => cordon_core::to_yaml(report)?,
        Output::Table => {
            let mut lines = vec![format!("{:<32} {:<30} {:<20} REASONS", "NODE", "CODE", "PLUGIN")];
            for node in &report.feasible {
                lines.push(format!("{:<32} {:<30} {:<20} -", node, "Success", "-"));
            }
            for outcome in report.failures() {
                lines.push(format!(
                    "{:<32} {:<30} {:<20} {}",
                    outcome.node_name,
                    outcome.status.code().as_str(),
                    outcome.plugin.as_deref().unwrap_or("-"),
                    outcome.status.message()
                ));
            }
            lines.push(report.summary());
            lines.join("\n")
        }
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const NODES: &str = r#"
apiVersion: v1
kind: Node
metadata:
  name: worker-1
spec:
  unschedulable: true
status:
  allocatable:
    cpu: "4"
    memory: 8Gi
---
apiVersion: v1
kind: Node
metadata:
  name: worker-2
status:
  allocatable:
    cpu: "2"
    memory: 4Gi
"#;

    const POD: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: web
      image: nginx
      resources:
        requests:
          cpu: "1"
          memory: 1Gi
"#;

    const PLACED: &str = r#"
apiVersion: v1
kind: Pod
metadata:
  name: db
spec:
  nodeName: worker-2
  containers:
    - name: db
      image: postgres
      resources:
        requests:
          cpu: 1500m
          memory: 1Gi
"#;

    #[test]
    fn test_cli_parses_filter_command() {
        let cli = Cli::try_parse_from([
            "cordon", "filter", "--pod", "pod.yaml", "--nodes", "a.yaml", "b.yaml", "--output",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Filter { nodes, output, .. } => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(output, Output::Json);
            }
            Commands::Plugins => panic!("expected filter command"),
        }
    }

    #[test]
    fn test_load_snapshot_accounts_placed_pods() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(dir.path(), "nodes.yaml", NODES);
        let placed = write_file(dir.path(), "placed.yaml", PLACED);

        let snapshot = load_snapshot(&[nodes], &[placed]).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0].pods().is_empty());
        assert_eq!(snapshot[1].pods().len(), 1);
        assert_eq!(snapshot[1].requested().cpu_millicores, 1500);
    }

    #[test]
    fn test_load_pod_requires_single_pod() {
        let dir = tempfile::tempdir().unwrap();
        let pod = write_file(dir.path(), "pod.yaml", POD);
        assert_eq!(load_pod(&pod).unwrap().name_or_unknown(), "web");

        let two = write_file(dir.path(), "two.yaml", &format!("{}\n---\n{}", POD, PLACED));
        assert!(load_pod(&two).is_err());
    }

    #[tokio::test]
    async fn test_filter_pass_over_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(dir.path(), "nodes.yaml", NODES);
        let placed = write_file(dir.path(), "placed.yaml", PLACED);
        let pod = write_file(dir.path(), "pod.yaml", POD);

        // worker-1 is cordoned, worker-2 lacks cpu once db is counted
        let result = run_filter(&pod, &[nodes.clone()], &[placed], None, Output::Table).await;
        assert!(result.is_err());

        let result = run_filter(&pod, &[nodes], &[], None, Output::Json).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_render_table() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(dir.path(), "nodes.yaml", NODES);
        let snapshot = load_snapshot(&[nodes], &[]).unwrap();

        let framework = Framework::new(
            &Registry::in_tree(),
            &FrameworkConfig::default(),
            Arc::new(SnapshotHandle::default()),
        )
        .unwrap();
        let report = framework
            .find_feasible_nodes(&Pod::default(), &snapshot, &CancellationToken::new())
            .unwrap();

        let table = render(&report, Output::Table).unwrap();
        assert!(table.contains("worker-2"));
        assert!(table.contains("UnschedulableAndUnresolvable"));
        assert!(table.contains("NodeUnschedulable"));
        assert!(table.ends_with("1/2 nodes are available: 1 node is unschedulable."));
    }
}
