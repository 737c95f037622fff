use crate::domain::model::{Contract, Interface, Microservice, Operation, Parameter, System};
use crate::utils::error::{DiagramError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File representation of a [`System`]. References between entities are by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandscapeConfig {
    pub system: SystemSection,
    #[serde(default)]
    pub microservices: Vec<MicroserviceConfig>,
    #[serde(default)]
    pub contracts: Vec<ContractConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroserviceConfig {
    pub name: String,
    pub technology: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub name: String,
    pub endpoint: Option<String>,
    pub communication_type: Option<String>,
    #[serde(default)]
    pub operations: Vec<OperationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    pub name: String,
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub name: String,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Microservice declaring the interface.
    pub provider: String,
    pub interface: String,
    pub consumer: String,
}

impl LandscapeConfig {
    /// Loads a `.json` file as JSON and anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(DiagramError::IoError)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| DiagramError::ParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        serde_json::from_str(&processed).map_err(|e| DiagramError::ParseError {
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiagramError::ParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Builds the domain model, resolving contract names to identities.
    pub fn into_system(&self) -> Result<System> {
        let mut system = System::new(self.system.name.as_str());

        for ms in &self.microservices {
            let mut microservice = Microservice::new(ms.name.as_str());
            microservice.technology = ms.technology.clone();

            for iface in &ms.interfaces {
                let mut interface = Interface::new(iface.name.as_str(), &microservice);
                interface.endpoint = iface.endpoint.clone();
                interface.communication_type = iface.communication_type.clone();
                interface.operations = iface.operations.iter().map(to_operation).collect();
                microservice.add_interface(interface);
            }

            system.add_microservice(microservice);
        }

        for (position, contract) in self.contracts.iter().enumerate() {
            let provider = find_microservice(&system, &contract.provider, position, "provider")?;
            let interface = provider
                .interfaces
                .iter()
                .find(|i| i.name == contract.interface)
                .ok_or_else(|| {
                    DiagramError::validation(format!(
                        "contracts[{}]: microservice '{}' declares no interface '{}'",
                        position, contract.provider, contract.interface
                    ))
                })?;
            let consumer = find_microservice(&system, &contract.consumer, position, "consumer")?;

            let resolved = Contract::new(interface, consumer);
            system.add_contract(resolved);
        }

        tracing::debug!(
            "Loaded system '{}' with {} microservices and {} contracts",
            system.name,
            system.microservices.len(),
            system.contracts.len()
        );
        Ok(system)
    }
}

fn to_operation(config: &OperationConfig) -> Operation {
    Operation {
        name: config.name.clone(),
        return_type: config.return_type.clone(),
        parameters: config
            .parameters
            .iter()
            .map(|p| Parameter {
                name: p.name.clone(),
                r#type: p.r#type.clone(),
            })
            .collect(),
    }
}

fn find_microservice<'s>(
    system: &'s System,
    name: &str,
    position: usize,
    role: &str,
) -> Result<&'s Microservice> {
    system
        .microservices
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| {
            DiagramError::validation(format!(
                "contracts[{}]: unknown {} microservice '{}'",
                position, role, name
            ))
        })
}

impl Validate for LandscapeConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("system.name", &self.system.name)?;

        for (i, ms) in self.microservices.iter().enumerate() {
            validate_non_empty_string(&format!("microservices[{}].name", i), &ms.name)?;

            for (j, iface) in ms.interfaces.iter().enumerate() {
                validate_non_empty_string(
                    &format!("microservices[{}].interfaces[{}].name", i, j),
                    &iface.name,
                )?;

                for (k, op) in iface.operations.iter().enumerate() {
                    validate_non_empty_string(
                        &format!("microservices[{}].interfaces[{}].operations[{}].name", i, j, k),
                        &op.name,
                    )?;
                }
            }
        }

        Ok(())
    }
}
