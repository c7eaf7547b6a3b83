//! Hardhat compilation artifacts.
//!
//! An artifact carries creation bytecode, the ABI and the positions of
//! unlinked library placeholders in the bytecode.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use alloy_core::{
    dyn_abi::{DynSolType, DynSolValue},
    primitives::{Address, U256},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{ChainError, ConstructorArg, DeploymentParameters};

use super::Contract;

/// Byte range of a library placeholder in the bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LinkReference {
    pub start: usize,
    pub length: usize,
}

/// A compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: Vec<Value>,
    pub bytecode: String,
    /// Source file -> library name -> placeholder positions.
    #[serde(default)]
    pub link_references: HashMap<String, HashMap<String, Vec<LinkReference>>>,
}

impl Artifact {
    /// Creation bytecode with every referenced library linked in.
    pub fn link(&self, libraries: &[(Contract, Address)]) -> Result<Vec<u8>, ChainError> {
        let mut code = self.bytecode.trim_start_matches("0x").to_string();

        for (library, references) in self.link_references.values().flatten() {
            let address = libraries
                .iter()
                .find(|(contract, _)| contract.to_string() == *library)
                .map(|(_, address)| *address)
                .ok_or_else(|| self.error(format!("library {library} is not linked")))?;
            let address = hex::encode(address);

            for reference in references {
                let start = reference.start * 2;
                let end = start + reference.length * 2;
                if end > code.len() || reference.length != 20 {
                    return Err(self.error(format!("bad link reference for {library}")));
                }
                code.replace_range(start..end, &address);
            }
        }

        hex::decode(&code).map_err(|e| self.error(format!("invalid bytecode: {e}")))
    }

    /// Constructor input types, in order. Empty when there is no constructor.
    pub fn constructor_inputs(&self) -> Result<Vec<DynSolType>, ChainError> {
        let Some(constructor) = self
            .abi
            .iter()
            .find(|entry| entry.get("type").and_then(Value::as_str) == Some("constructor"))
        else {
            return Ok(Vec::new());
        };

        constructor
            .get("inputs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|input| {
                let ty = input
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| self.error("constructor input without a type".to_string()))?;
                DynSolType::parse(ty).map_err(|e| ChainError::Abi(e.to_string()))
            })
            .collect()
    }

    /// ABI-encode constructor arguments against the artifact's constructor.
    pub fn encode_constructor(&self, args: &DeploymentParameters) -> Result<Vec<u8>, ChainError> {
        let inputs = self.constructor_inputs()?;
        if inputs.len() != args.len() {
            return Err(ChainError::Abi(format!(
                "{} constructor takes {} arguments, got {}",
                self.contract_name,
                inputs.len(),
                args.len()
            )));
        }
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let values = args
            .iter()
            .zip(&inputs)
            .map(|(arg, ty)| coerce(arg, ty))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DynSolValue::Tuple(values).abi_encode_params())
    }

    fn error(&self, reason: String) -> ChainError {
        ChainError::Artifact {
            contract: self.contract_name.clone(),
            reason,
        }
    }
}

/// Convert a constructor argument into the ABI type the constructor expects.
fn coerce(arg: &ConstructorArg, ty: &DynSolType) -> Result<DynSolValue, ChainError> {
    let value = match (arg, ty) {
        (ConstructorArg::Address(address), DynSolType::Address) => DynSolValue::Address(*address),
        (ConstructorArg::Amount(amount), DynSolType::Uint(bits)) => DynSolValue::Uint(*amount, *bits),
        (ConstructorArg::Count(count), DynSolType::Uint(bits)) => {
            DynSolValue::Uint(U256::from(*count), *bits)
        }
        (ConstructorArg::Flag(flag), DynSolType::Bool) => DynSolValue::Bool(*flag),
        (ConstructorArg::Text(text), ty) => ty
            .coerce_str(text)
            .map_err(|e| ChainError::Abi(format!("cannot coerce {text:?} to {ty:?}: {e}")))?,
        (ConstructorArg::AddressList(addresses), DynSolType::Array(inner))
            if **inner == DynSolType::Address =>
        {
            DynSolValue::Array(addresses.iter().copied().map(DynSolValue::Address).collect())
        }
        (ConstructorArg::AmountList(amounts), DynSolType::Array(inner)) => match inner.as_ref() {
            DynSolType::Uint(bits) => DynSolValue::Array(
                amounts
                    .iter()
                    .map(|amount| DynSolValue::Uint(*amount, *bits))
                    .collect(),
            ),
            other => {
                return Err(ChainError::Abi(format!("cannot encode amounts as {other:?}[]")));
            }
        },
        (arg, ty) => {
            return Err(ChainError::Abi(format!("cannot encode {} as {ty:?}", arg.kind())));
        }
    };
    Ok(value)
}

/// Artifacts under a Hardhat `artifacts/` directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the artifact of a contract, searching the tree for `<name>.json`.
    pub fn load(&self, contract: Contract) -> Result<Artifact, ChainError> {
        let name = contract.to_string();
        let path = find_file(&self.root, &format!("{name}.json")).ok_or_else(|| {
            ChainError::Artifact {
                contract: name.clone(),
                reason: format!("not found under {}", self.root.display()),
            }
        })?;

        let content = std::fs::read_to_string(&path).map_err(|e| ChainError::Artifact {
            contract: name.clone(),
            reason: format!("failed to read {}: {e}", path.display()),
        })?;

        serde_json::from_str(&content).map_err(|e| ChainError::Artifact {
            contract: name,
            reason: format!("failed to parse {}: {e}", path.display()),
        })
    }
}

fn find_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.file_name().and_then(|n| n.to_str()) == Some(file_name) {
            return Some(path);
        }
    }

    subdirs.sort();
    subdirs.iter().find_map(|subdir| find_file(subdir, file_name))
}
