use crate::types::Type;
use serde::{Deserialize, Serialize};

/// All contracts extracted from a single script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractModel {
    pub classes: Vec<ContractClass>,
}

/// One exported API surface, named after its export rather than the guest symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractClass {
    pub name: String,
    pub methods: Vec<ContractMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMethod {
    pub name: String,
    pub params: Vec<ContractParam>,
    pub return_type: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: Type,
}

impl ContractModel {
    pub fn new(classes: Vec<ContractClass>) -> Self {
        Self { classes }
    }

    pub fn single(class: ContractClass) -> Self {
        Self {
            classes: vec![class],
        }
    }

    pub fn find_class(&self, name: &str) -> Option<&ContractClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl ContractClass {
    pub fn new(name: impl Into<String>, methods: Vec<ContractMethod>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    pub fn find_method(&self, name: &str) -> Option<&ContractMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}

impl ContractMethod {
    pub fn new(name: impl Into<String>, params: Vec<ContractParam>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }
}

impl ContractParam {
    pub fn new(name: impl Into<String>, type_: Type) -> Self {
        Self {
            name: name.into(),
            type_,
        }
    }
}
