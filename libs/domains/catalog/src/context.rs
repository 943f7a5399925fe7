use strum::{Display, EnumIter};

/// Operation performed on the product resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ProductAction {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

/// Shape of the data an action exchanges with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Contract {
    /// `ProductView`, no validation
    Read,
    /// `CreateProduct` / `UpdateProduct`, validated before persistence
    Write,
}

impl ProductAction {
    /// `None` for actions without a body, i.e. `Destroy`.
    pub fn contract(self) -> Option<Contract> {
        match self {
            Self::List | Self::Retrieve => Some(Contract::Read),
            Self::Create | Self::Update | Self::PartialUpdate => Some(Contract::Write),
            Self::Destroy => None,
        }
    }

    pub fn is_write(self) -> bool {
        self.contract() == Some(Contract::Write)
    }
}

/// Per-request state handed from a handler to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub action: ProductAction,
}

impl RequestContext {
    pub fn new(action: ProductAction) -> Self {
        Self { action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_contract_selection() {
        let writes: Vec<_> = ProductAction::iter().filter(|a| a.is_write()).collect();
        assert_eq!(
            writes,
            vec![
                ProductAction::Create,
                ProductAction::Update,
                ProductAction::PartialUpdate
            ]
        );
        assert_eq!(ProductAction::List.contract(), Some(Contract::Read));
        assert_eq!(ProductAction::Destroy.contract(), None);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(ProductAction::PartialUpdate.to_string(), "partial_update");
    }
}
