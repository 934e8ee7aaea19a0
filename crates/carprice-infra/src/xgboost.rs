//! XGBoost JSON model loader and tree-ensemble inference
//!
//! Reads the document written by `Booster.save_model("model.json")` and
//! evaluates the regression trees in-process. Only single-target `gbtree`
//! regressors with numerical splits are accepted; everything is validated at
//! load time so that prediction cannot fail.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use carprice_domain::service::Estimator;
use carprice_types::{Error, Result};

use crate::artifact::open_artifact;

#[derive(Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
}

#[derive(Deserialize)]
struct LearnerDocument {
    #[serde(default)]
    attributes: LearnerAttributes,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBoosterDocument,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDocument,
}

/// Training attributes; `best_iteration` is set by early stopping
#[derive(Deserialize, Default)]
struct LearnerAttributes {
    #[serde(default)]
    best_iteration: Option<String>,
}

#[derive(Deserialize)]
struct GradientBoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<GbTreeModelDocument>,
}

#[derive(Deserialize)]
struct GbTreeModelDocument {
    #[serde(default)]
    gbtree_model_param: Option<GbTreeModelParam>,
    trees: Vec<TreeDocument>,
}

#[derive(Deserialize)]
struct GbTreeModelParam {
    #[serde(default)]
    num_parallel_tree: Option<String>,
}

#[derive(Deserialize)]
struct TreeDocument {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// Older writers emit 0/1, newer ones true/false
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Int(i) => *i != 0,
        }
    }
}

#[derive(Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    #[serde(default)]
    num_target: Option<String>,
}

#[derive(Deserialize)]
struct ObjectiveDocument {
    name: String,
}

/// How the summed margin maps to a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Identity,
    Log,
}

impl Link {
    fn from_objective(name: &str) -> Result<Self> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:squaredlogerror" | "reg:absoluteerror"
            | "reg:pseudohubererror" | "reg:quantileerror" => Ok(Link::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Link::Log),
            other => Err(Error::ModelFormat(format!(
                "objective '{}' is not a supported regression objective",
                other
            ))),
        }
    }

    /// Margin contributed by the stored base score
    fn base_margin(&self, base_score: f64) -> Result<f64> {
        match self {
            Link::Identity => Ok(base_score),
            Link::Log if base_score > 0.0 => Ok(base_score.ln()),
            Link::Log => Err(Error::ModelFormat(format!(
                "base_score {} must be positive for a log-link objective",
                base_score
            ))),
        }
    }

    fn apply(&self, margin: f64) -> f64 {
        match self {
            Link::Identity => margin,
            Link::Log => margin.exp(),
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
}

#[derive(Debug, Clone)]
struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn from_document(doc: TreeDocument, tree_idx: usize, num_features: usize) -> Result<Self> {
        let n = doc.left_children.len();
        let invalid = |msg: String| Error::ModelFormat(format!("tree {}: {}", tree_idx, msg));

        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if doc.right_children.len() != n
            || doc.split_indices.len() != n
            || doc.split_conditions.len() != n
            || doc.default_left.len() != n
        {
            return Err(invalid("node arrays have different lengths".to_string()));
        }
        if !doc.split_type.is_empty() && doc.split_type.len() != n {
            return Err(invalid("split_type length does not match node count".to_string()));
        }

        // Children always come after their parent, which rules out cycles.
        let child = |idx: usize, raw: i64| -> Result<usize> {
            usize::try_from(raw)
                .ok()
                .filter(|&c| c > idx && c < n)
                .ok_or_else(|| invalid(format!("node {} has invalid child {}", idx, raw)))
        };

        let mut nodes = Vec::with_capacity(n);
        for idx in 0..n {
            let left = doc.left_children[idx];
            let right = doc.right_children[idx];

            if left == -1 {
                if right != -1 {
                    return Err(invalid(format!("node {} has only one child", idx)));
                }
                nodes.push(Node::Leaf {
                    value: doc.split_conditions[idx],
                });
                continue;
            }

            if doc.split_type.get(idx).copied().unwrap_or(0) != 0 {
                return Err(invalid(format!("node {} uses a categorical split", idx)));
            }
            let feature = usize::try_from(doc.split_indices[idx])
                .ok()
                .filter(|&f| f < num_features)
                .ok_or_else(|| {
                    invalid(format!(
                        "node {} splits on unknown feature {}",
                        idx, doc.split_indices[idx]
                    ))
                })?;

            nodes.push(Node::Split {
                feature,
                threshold: doc.split_conditions[idx],
                left: child(idx, left)?,
                right: child(idx, right)?,
                default_left: doc.default_left[idx].is_set(),
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = features.get(feature).copied().unwrap_or(f64::NAN);
                    idx = if x.is_nan() {
                        if default_left {
                            left
                        } else {
                            right
                        }
                    } else if (x as f32) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Gradient-boosted tree regressor loaded from an XGBoost JSON model
#[derive(Debug, Clone)]
pub struct XgbRegressor {
    feature_names: Vec<String>,
    base_margin: f64,
    link: Link,
    trees: Vec<RegressionTree>,
}

impl XgbRegressor {
    /// Load a model file; a missing file is [`Error::DataUnavailable`]
    pub fn load(path: &Path) -> Result<Self> {
        let file = open_artifact(path)?;
        let model = Self::from_reader(file)?;
        tracing::debug!(
            path = %path.display(),
            trees = model.trees.len(),
            features = model.feature_names.len(),
            "loaded XGBoost model"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    fn from_document(doc: ModelDocument) -> Result<Self> {
        let learner = doc.learner;

        if learner.feature_names.is_empty() {
            return Err(Error::ModelFormat(
                "model was saved without feature names".to_string(),
            ));
        }
        for (label, value) in [
            ("num_class", &learner.learner_model_param.num_class),
            ("num_target", &learner.learner_model_param.num_target),
        ] {
            let count = value.as_deref().map(parse_count).transpose()?.unwrap_or(0);
            if count > 1 {
                return Err(Error::ModelFormat(format!(
                    "{} = {}; only single-output regressors are supported",
                    label, count
                )));
            }
        }

        let booster = learner.gradient_booster;
        if booster.name != "gbtree" {
            return Err(Error::ModelFormat(format!(
                "booster '{}' is not supported, expected 'gbtree'",
                booster.name
            )));
        }
        let tree_model = booster
            .model
            .ok_or_else(|| Error::ModelFormat("gbtree booster has no model".to_string()))?;

        let link = Link::from_objective(&learner.objective.name)?;
        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;
        let base_margin = link.base_margin(base_score)?;

        // Early-stopped models keep the rounds after the best one; predict
        // with rounds 0..=best_iteration only.
        let mut tree_docs = tree_model.trees;
        if let Some(best) = learner.attributes.best_iteration.as_deref() {
            let parallel = tree_model
                .gbtree_model_param
                .and_then(|p| p.num_parallel_tree)
                .as_deref()
                .map(parse_count)
                .transpose()?
                .unwrap_or(1)
                .max(1);
            let rounds = parse_count(best)?.saturating_add(1);
            let keep = usize::try_from(rounds.saturating_mul(parallel)).unwrap_or(usize::MAX);
            if keep < tree_docs.len() {
                tracing::debug!(
                    best_iteration = best,
                    kept = keep,
                    total = tree_docs.len(),
                    "truncating trees to the best iteration"
                );
                tree_docs.truncate(keep);
            }
        }

        let num_features = learner.feature_names.len();
        let trees = tree_docs
            .into_iter()
            .enumerate()
            .map(|(i, tree)| RegressionTree::from_document(tree, i, num_features))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            feature_names: learner.feature_names,
            base_margin,
            link,
            trees,
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn margin(&self, features: &[f64]) -> f64 {
        self.base_margin
            + self
                .trees
                .iter()
                .map(|tree| f64::from(tree.leaf_value(features)))
                .sum::<f64>()
    }
}

impl Estimator for XgbRegressor {
    fn expected_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.link.apply(self.margin(features))
    }
}

/// `base_score` is a string, bracketed (`"[5E-1]"`) in newer writers
fn parse_base_score(raw: &str) -> Result<f64> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    trimmed
        .parse()
        .map_err(|_| Error::ModelFormat(format!("invalid base_score '{}'", raw)))
}

fn parse_count(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::ModelFormat(format!("invalid count '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn model(feature_names: &[&str], objective: &str, base_score: &str, trees: Vec<Value>) -> String {
        json!({
            "learner": {
                "attributes": {},
                "feature_names": feature_names,
                "feature_types": feature_names.iter().map(|_| "float").collect::<Vec<_>>(),
                "gradient_booster": {
                    "name": "gbtree",
                    "model": {
                        "gbtree_model_param": { "num_parallel_tree": "1", "num_trees": trees.len().to_string() },
                        "tree_info": vec![0; trees.len()],
                        "trees": trees
                    }
                },
                "learner_model_param": {
                    "base_score": base_score,
                    "num_class": "0",
                    "num_feature": feature_names.len().to_string()
                },
                "objective": { "name": objective }
            },
            "version": [2, 0, 3]
        })
        .to_string()
    }

    fn leaf_tree(value: f32) -> Value {
        json!({
            "left_children": [-1],
            "right_children": [-1],
            "split_indices": [0],
            "split_conditions": [value],
            "default_left": [0],
            "split_type": [0]
        })
    }

    /// year < 2015 -> 200000, else 500000; missing year goes left
    fn year_tree() -> Value {
        json!({
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [1, 0, 0],
            "split_conditions": [2015.0, 200000.0, 500000.0],
            "default_left": [true, false, false],
            "split_type": [0, 0, 0]
        })
    }

    #[test]
    fn test_single_leaf_plus_base_score() {
        let json = model(&["kms_driven", "year"], "reg:squarederror", "5E-1", vec![leaf_tree(0.25)]);
        let regressor = XgbRegressor::from_json_str(&json).unwrap();

        assert_eq!(regressor.expected_feature_names(), &["kms_driven", "year"]);
        assert!((regressor.predict(&[0.0, 0.0]) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_split_routes_by_threshold() {
        let json = model(&["kms_driven", "year"], "reg:squarederror", "[0E0]", vec![year_tree()]);
        let regressor = XgbRegressor::from_json_str(&json).unwrap();

        assert!((regressor.predict(&[50000.0, 2012.0]) - 200000.0).abs() < 1e-3);
        assert!((regressor.predict(&[50000.0, 2015.0]) - 500000.0).abs() < 1e-3);
        assert!((regressor.predict(&[50000.0, f64::NAN]) - 200000.0).abs() < 1e-3);
    }

    #[test]
    fn test_trees_are_summed() {
        let json = model(
            &["kms_driven", "year"],
            "reg:squarederror",
            "1000",
            vec![year_tree(), leaf_tree(-500.0)],
        );
        let regressor = XgbRegressor::from_json_str(&json).unwrap();
        assert_eq!(regressor.num_trees(), 2);
        assert!((regressor.predict(&[0.0, 2020.0]) - 500500.0).abs() < 1e-3);
    }

    #[test]
    fn test_best_iteration_limits_trees() {
        let mut doc: Value = serde_json::from_str(&model(
            &["year"],
            "reg:squarederror",
            "0",
            vec![leaf_tree(500000.0), leaf_tree(100000.0)],
        ))
        .unwrap();
        doc["learner"]["attributes"] = json!({ "best_iteration": "0", "best_score": "1.5" });
        let regressor = XgbRegressor::from_json_str(&doc.to_string()).unwrap();

        assert_eq!(regressor.num_trees(), 1);
        assert!((regressor.predict(&[2018.0]) - 500000.0).abs() < 1e-3);
    }

    #[test]
    fn test_best_iteration_counts_parallel_trees() {
        let mut doc: Value = serde_json::from_str(&model(
            &["year"],
            "reg:squarederror",
            "0",
            vec![leaf_tree(1.0), leaf_tree(2.0), leaf_tree(4.0), leaf_tree(8.0)],
        ))
        .unwrap();
        doc["learner"]["attributes"] = json!({ "best_iteration": "0" });
        doc["learner"]["gradient_booster"]["model"]["gbtree_model_param"]["num_parallel_tree"] =
            json!("2");
        let regressor = XgbRegressor::from_json_str(&doc.to_string()).unwrap();

        assert_eq!(regressor.num_trees(), 2);
        assert!((regressor.predict(&[2018.0]) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_best_iteration_past_last_round_keeps_all() {
        let mut doc: Value = serde_json::from_str(&model(
            &["year"],
            "reg:squarederror",
            "0",
            vec![leaf_tree(1.0), leaf_tree(2.0)],
        ))
        .unwrap();
        doc["learner"]["attributes"] = json!({ "best_iteration": "5" });
        let regressor = XgbRegressor::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(regressor.num_trees(), 2);
    }

    #[test]
    fn test_log_link_objective() {
        let json = model(&["year"], "reg:gamma", "1", vec![leaf_tree(2.0)]);
        let regressor = XgbRegressor::from_json_str(&json).unwrap();
        assert!((regressor.predict(&[2018.0]) - 2.0f64.exp()).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_missing_feature_names() {
        let json = model(&[], "reg:squarederror", "0", vec![leaf_tree(1.0)]);
        let err = XgbRegressor::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("feature names"));
    }

    #[test]
    fn test_rejects_classification_objective() {
        let json = model(&["year"], "binary:logistic", "0.5", vec![leaf_tree(1.0)]);
        assert!(matches!(
            XgbRegressor::from_json_str(&json),
            Err(Error::ModelFormat(_))
        ));
    }

    #[test]
    fn test_rejects_split_on_unknown_feature() {
        // year_tree splits on index 1, only one feature here
        let json = model(&["year"], "reg:squarederror", "0", vec![year_tree()]);
        let err = XgbRegressor::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("unknown feature"));
    }

    #[test]
    fn test_rejects_backward_child() {
        let mut tree = year_tree();
        tree["left_children"] = json!([0, -1, -1]);
        let json = model(&["kms_driven", "year"], "reg:squarederror", "0", vec![tree]);
        let err = XgbRegressor::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("invalid child"));
    }

    #[test]
    fn test_rejects_categorical_split() {
        let mut tree = year_tree();
        tree["split_type"] = json!([1, 0, 0]);
        let json = model(&["kms_driven", "year"], "reg:squarederror", "0", vec![tree]);
        let err = XgbRegressor::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("categorical"));
    }

    #[test]
    fn test_rejects_non_tree_booster() {
        let mut doc: Value = serde_json::from_str(&model(
            &["year"],
            "reg:squarederror",
            "0",
            vec![leaf_tree(1.0)],
        ))
        .unwrap();
        doc["learner"]["gradient_booster"]["name"] = json!("gblinear");
        let err = XgbRegressor::from_json_str(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("gblinear"));
    }

    #[test]
    fn test_parse_base_score_forms() {
        assert!((parse_base_score("5E-1").unwrap() - 0.5).abs() < 1e-12);
        assert!((parse_base_score("[4.5E5]").unwrap() - 450000.0).abs() < 1e-6);
        assert!(parse_base_score("abc").is_err());
    }
}
