use log::{debug, info};

use crate::algorithms::{self, Procedure, edge_weight};
use crate::error::ComputeError;
use crate::topology::Topology;
use crate::types::{ComputeRequest, PathResult, ResultMap};

/// Joins two endpoints into a result-map key. Identifiers that themselves
/// contain `_` can collide; the format is kept as-is for existing consumers.
pub fn pair_key(source: &str, target: &str) -> String {
    format!("{source}_{target}")
}

/// Runs one request end to end: build the topology, resolve the algorithm,
/// fill one slot per unordered switch pair. A pair that fails gets an inline
/// error marker; only an unknown selector or a whole-graph failure rejects
/// the request.
pub fn compute(request: &ComputeRequest) -> Result<ResultMap, ComputeError> {
    let topology = Topology::from_records(&request.topo);
    let switches = topology.switches();
    info!(
        "topology built: {} nodes, {} links, {} switches",
        topology.node_count(),
        topology.edge_count(),
        switches.len()
    );
    if !request.metric.is_empty() {
        debug!("metric weights {:?} accepted, not applied", request.metric);
    }

    let spec = algorithms::resolve(&request.algo).ok_or(ComputeError::AlgorithmNotRecognized)?;
    debug!("selector {} resolved, mode {:?}", spec.name, spec.mode);

    let mut results = ResultMap::new();
    match spec.procedure {
        Procedure::PairPath(run) => {
            for (i, &source) in switches.iter().enumerate() {
                for &target in &switches[i + 1..] {
                    let key = pair_key(topology.node_id(source), topology.node_id(target));
                    let entry = match run(&topology, source, target, edge_weight) {
                        Ok(path) => PathResult::Path(path),
                        Err(err) => {
                            debug!("{}: {}", key, err);
                            PathResult::Error { error: err.to_string() }
                        }
                    };
                    results.entry(key).or_default().push(entry);
                }
            }
        }
        Procedure::PairPaths(run) => {
            for (i, &source) in switches.iter().enumerate() {
                for &target in &switches[i + 1..] {
                    let key = pair_key(topology.node_id(source), topology.node_id(target));
                    match run(&topology, source, target, edge_weight) {
                        Ok(paths) => {
                            results.insert(key, paths.into_iter().map(PathResult::Path).collect());
                        }
                        Err(err) => {
                            debug!("{}: {}", key, err);
                            results.insert(key, vec![PathResult::Error { error: err.to_string() }]);
                        }
                    }
                }
            }
        }
        Procedure::WholeGraph(run) => {
            let all = run(&topology, edge_weight).map_err(|source| {
                ComputeError::AllPairsFailed { algo: spec.name.to_string(), source }
            })?;
            // Project ordered switch pairs out of the whole-graph answer;
            // unreachable pairs are simply absent
            for &source in &switches {
                for &target in &switches {
                    if source == target {
                        continue;
                    }
                    let source_id = topology.node_id(source);
                    let target_id = topology.node_id(target);
                    if let Some(path) = all.get(source_id).and_then(|from| from.get(target_id)) {
                        results
                            .entry(pair_key(source_id, target_id))
                            .or_default()
                            .push(PathResult::Path(path.clone()));
                    }
                }
            }
        }
    }

    info!("{} produced {} result slots", spec.name, results.len());
    Ok(results)
}
