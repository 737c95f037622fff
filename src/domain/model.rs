use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a [`Microservice`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MicroserviceId(u64);

/// Identity of an [`Interface`], unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(u64);

impl fmt::Display for MicroserviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ms#{}", self.0)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub r#type: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: None,
        }
    }

    pub fn typed(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: Some(r#type.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    /// `None` means the operation returns nothing.
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
        }
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Interface {
    id: InterfaceId,
    owner: MicroserviceId,
    pub name: String,
    pub endpoint: Option<String>,
    pub communication_type: Option<String>,
    pub operations: Vec<Operation>,
}

impl Interface {
    pub fn new(name: impl Into<String>, owner: &Microservice) -> Self {
        Self {
            id: InterfaceId(next_id()),
            owner: owner.id(),
            name: name.into(),
            endpoint: None,
            communication_type: None,
            operations: Vec::new(),
        }
    }

    pub fn id(&self) -> InterfaceId {
        self.id
    }

    /// Back-reference to the microservice declaring this interface.
    pub fn owner(&self) -> MicroserviceId {
        self.owner
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_communication_type(mut self, communication_type: impl Into<String>) -> Self {
        self.communication_type = Some(communication_type.into());
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Microservice {
    id: MicroserviceId,
    pub name: String,
    pub technology: Option<String>,
    pub interfaces: Vec<Interface>,
}

impl Microservice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MicroserviceId(next_id()),
            name: name.into(),
            technology: None,
            interfaces: Vec::new(),
        }
    }

    pub fn id(&self) -> MicroserviceId {
        self.id
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    /// Takes ownership of `interface`; its back-reference is re-pointed at `self`.
    pub fn add_interface(&mut self, mut interface: Interface) -> InterfaceId {
        interface.owner = self.id;
        let id = interface.id;
        self.interfaces.push(interface);
        id
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.add_interface(interface);
        self
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.id == id)
    }
}

/// A consumer microservice depending on an interface of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    owner: InterfaceId,
    consumer: MicroserviceId,
}

impl Contract {
    pub fn new(owner: &Interface, consumer: &Microservice) -> Self {
        Self {
            owner: owner.id(),
            consumer: consumer.id(),
        }
    }

    pub fn owner(&self) -> InterfaceId {
        self.owner
    }

    pub fn consumer(&self) -> MicroserviceId {
        self.consumer
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub name: String,
    pub microservices: Vec<Microservice>,
    pub contracts: Vec<Contract>,
}

impl System {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            microservices: Vec::new(),
            contracts: Vec::new(),
        }
    }

    pub fn add_microservice(&mut self, microservice: Microservice) -> MicroserviceId {
        let id = microservice.id();
        self.microservices.push(microservice);
        id
    }

    pub fn with_microservice(mut self, microservice: Microservice) -> Self {
        self.add_microservice(microservice);
        self
    }

    pub fn add_contract(&mut self, contract: Contract) {
        self.contracts.push(contract);
    }

    pub fn with_contract(mut self, contract: Contract) -> Self {
        self.add_contract(contract);
        self
    }

    pub fn microservice(&self, id: MicroserviceId) -> Option<&Microservice> {
        self.microservices.iter().find(|m| m.id() == id)
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&Interface> {
        self.microservices.iter().find_map(|m| m.interface(id))
    }

    pub fn contains_microservice(&self, id: MicroserviceId) -> bool {
        self.microservice(id).is_some()
    }

    /// The microservice of this system that declares the interface.
    pub fn provider_of(&self, id: InterfaceId) -> Option<&Microservice> {
        self.microservices.iter().find(|m| m.interface(id).is_some())
    }

    /// True when some microservice of this system declares the interface.
    pub fn owns_interface(&self, id: InterfaceId) -> bool {
        self.interface(id).is_some()
    }
}
