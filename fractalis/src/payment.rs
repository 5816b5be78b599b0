/// Mobile money operators offered at the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    AirtelMoney,
    OrangeMoney,
    Flooz,
    MynitaAmanata,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::AirtelMoney,
        PaymentMethod::OrangeMoney,
        PaymentMethod::Flooz,
        PaymentMethod::MynitaAmanata,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::AirtelMoney => "airtel",
            Self::OrangeMoney => "orange",
            Self::Flooz => "flooz",
            Self::MynitaAmanata => "mynita",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AirtelMoney => "Airtel Money",
            Self::OrangeMoney => "Orange Money",
            Self::Flooz => "Flooz",
            Self::MynitaAmanata => "Mynita Amanata",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
