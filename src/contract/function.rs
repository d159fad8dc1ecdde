use std::fmt;
use std::str::FromStr;

use crate::common::{Error, ErrorKind};

/// Functions the ticket contract answers to, matched by exact name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    QueryTicket,
    InitLedger,
    CreateTicket,
    QueryAllTickets,
    ChangeTicketOwner,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::QueryTicket,
        Function::InitLedger,
        Function::CreateTicket,
        Function::QueryAllTickets,
        Function::ChangeTicketOwner,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::QueryTicket => "queryTicket",
            Function::InitLedger => "initLedger",
            Function::CreateTicket => "createTicket",
            Function::QueryAllTickets => "queryAllTickets",
            Function::ChangeTicketOwner => "changeTicketOwner",
        }
    }
}

impl FromStr for Function {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| ErrorKind::UnknownFunction(s.to_owned()).into())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact_match() {
        for function in Function::ALL {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
        assert!("QueryTicket".parse::<Function>().is_err());
        assert!("queryTicket ".parse::<Function>().is_err());
        assert!("".parse::<Function>().is_err());
    }
}
