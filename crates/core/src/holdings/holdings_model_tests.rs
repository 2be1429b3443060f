use super::*;
use crate::constants::MAX_VALUATION_AMOUNT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sunrise_st() -> Holding {
    Holding {
        id: "98".to_string(),
        name: "5 Sunrise St".to_string(),
        side: HoldingSide::Asset,
        valuations: vec![
            Valuation::new(date("2014-09-10"), dec!(520000), ValuationKind::Purchase)
                .with_note("Purchase price"),
            Valuation::new(date("2016-04-15"), dec!(705000), ValuationKind::Revaluation)
                .with_note("Formal valuation"),
        ],
        notes: None,
        details: None,
    }
}

#[test]
fn test_latest_valuation_ignores_list_order() {
    let mut holding = sunrise_st();
    holding.valuations.reverse();
    assert_eq!(holding.current_value(), dec!(705000));
    assert_eq!(holding.first_valuation_date(), Some(date("2014-09-10")));
}

#[test]
fn test_latest_valuation_skips_undated_entries() {
    let mut holding = sunrise_st();
    holding.valuations.push(Valuation {
        date: None,
        amount: dec!(999999),
        kind: ValuationKind::Revaluation,
        note: None,
    });
    assert_eq!(holding.current_value(), dec!(705000));
}

#[test]
fn test_latest_valuation_same_date_last_listed_wins() {
    let mut holding = sunrise_st();
    holding.valuations.push(Valuation::new(
        date("2016-04-15"),
        dec!(710000),
        ValuationKind::Revaluation,
    ));
    assert_eq!(holding.current_value(), dec!(710000));
}

#[test]
fn test_current_value_without_valuations_is_zero() {
    let mut holding = sunrise_st();
    holding.valuations.clear();
    assert_eq!(holding.current_value(), dec!(0));
    assert!(holding.latest_valuation().is_none());
    assert!(holding.first_valuation_date().is_none());
}

#[test]
fn test_validate_rejects_blank_name_and_out_of_range_amounts() {
    let mut holding = sunrise_st();
    holding.name = "   ".to_string();
    assert!(holding.validate().unwrap_err().is_validation());

    let mut holding = sunrise_st();
    holding.valuations[0].amount = dec!(-1);
    assert!(holding.validate().unwrap_err().is_validation());

    let mut holding = sunrise_st();
    holding.valuations[0].amount = Decimal::MAX;
    assert!(holding.validate().unwrap_err().is_validation());

    let mut holding = sunrise_st();
    holding.valuations[0].amount = Decimal::from(MAX_VALUATION_AMOUNT);
    assert!(holding.validate().is_ok());
    holding.valuations[0].amount += dec!(0.01);
    assert!(holding.validate().unwrap_err().is_validation());

    assert!(sunrise_st().validate().is_ok());
}

fn briggs_primary() -> NewHolding {
    NewHolding {
        id: Some("832".to_string()),
        name: "Briggs Primary".to_string(),
        side: HoldingSide::Liability,
        valuations: vec![Valuation::new(
            date("2019-05-10"),
            dec!(150000),
            ValuationKind::Purchase,
        )],
        notes: None,
        details: Some(HoldingDetails::Loan(LoanDetails {
            principal: Some(dec!(150000)),
            current_balance: None,
            interest_rate: Some(dec!(400)),
            repayment_type: Some(RepaymentType::InterestOnly),
            compounding_period: Some(CompoundingPeriod::Monthly),
            start_date: Some(date("2019-05-10")),
            end_date: Some(date("2029-05-10")),
            establishment_fees: Some(dec!(1500)),
        })),
    }
}

#[test]
fn test_loan_details_round_trip() {
    let holding = briggs_primary().into_holding("832".to_string());
    assert!(holding.validate().is_ok());

    let json = serde_json::to_value(&holding).unwrap();
    let details = &json["details"];
    assert_eq!(details["type"], "Loan");
    assert_eq!(details["principal"], "150000");
    assert_eq!(details["interestRate"], "400");
    assert_eq!(details["repaymentType"], "interestOnly");
    assert_eq!(details["compoundingPeriod"], "monthly");
    assert_eq!(details["startDate"], "2019-05-10");
    assert_eq!(details["endDate"], "2029-05-10");
    assert_eq!(details["establishmentFees"], "1500");
    assert!(details.get("currentBalance").is_none());

    let decoded: Holding = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, holding);
}

#[test]
fn test_real_estate_details_round_trip() {
    let mut holding = sunrise_st();
    holding.details = Some(HoldingDetails::RealEstate(RealEstateDetails {
        address: Some(Address {
            line1: "5 Sunrise St".to_string(),
            locality: "Bulimba".to_string(),
            state: "QLD".to_string(),
            postcode: "4171".to_string(),
            ..Address::default()
        }),
        start_date: Some(date("2014-09-10")),
    }));
    assert!(holding.validate().is_ok());

    let json = serde_json::to_string(&holding).unwrap();
    assert!(json.contains(r#""type":"RealEstate""#));
    let decoded: Holding = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, holding);
}

#[test]
fn test_details_must_match_side() {
    let mut loan = briggs_primary();
    loan.side = HoldingSide::Asset;
    assert!(loan.validate().unwrap_err().is_validation());

    let mut house = sunrise_st();
    house.side = HoldingSide::Liability;
    house.details = Some(HoldingDetails::RealEstate(RealEstateDetails::default()));
    assert!(house.validate().unwrap_err().is_validation());
}

#[test]
fn test_loan_details_validation() {
    fn with_loan(edit: impl FnOnce(&mut LoanDetails)) -> crate::errors::Result<()> {
        let mut new_holding = briggs_primary();
        if let Some(HoldingDetails::Loan(loan)) = new_holding.details.as_mut() {
            edit(loan);
        }
        new_holding.validate()
    }

    assert!(with_loan(|_| {}).is_ok());
    assert!(with_loan(|loan| loan.principal = Some(dec!(-5))).is_err());
    assert!(with_loan(|loan| loan.establishment_fees = Some(Decimal::MAX)).is_err());
    assert!(with_loan(|loan| loan.end_date = Some(date("2019-05-09"))).is_err());
    assert!(with_loan(|loan| loan.start_date = None).is_ok());
}

#[test]
fn test_new_holding_validation() {
    let new_holding = NewHolding {
        id: Some(" ".to_string()),
        name: "Briggs Primary".to_string(),
        side: HoldingSide::Liability,
        valuations: vec![],
        notes: None,
        details: None,
    };
    assert!(new_holding.validate().is_err());

    let new_holding = NewHolding {
        id: None,
        ..new_holding
    };
    assert!(new_holding.validate().is_ok());
    let holding = new_holding.into_holding("832".to_string());
    assert_eq!(holding.id, "832");
    assert_eq!(holding.side, HoldingSide::Liability);
}

#[test]
fn test_valuation_deserializes_legacy_records() {
    let json = r#"{
        "id": "99",
        "name": "38/8 Briggs Road",
        "side": "asset",
        "valuations": [
            {"date": "2014-05-10", "amount": "165000", "note": "Purchase price", "kind": "purchase"},
            {"date": "2015-09-10", "amount": "260000", "kind": "none"},
            {"amount": "1"}
        ]
    }"#;
    let holding: Holding = serde_json::from_str(json).unwrap();
    assert_eq!(holding.valuations[0].kind, ValuationKind::Purchase);
    assert_eq!(holding.valuations[1].kind, ValuationKind::Revaluation);
    assert_eq!(holding.valuations[2].date, None);
    assert_eq!(holding.current_value(), dec!(260000));
    assert!(holding.details.is_none());
}

#[test]
fn test_holding_side_parsing_and_stores() {
    assert_eq!("asset".parse::<HoldingSide>().unwrap(), HoldingSide::Asset);
    assert_eq!("Liabilities".parse::<HoldingSide>().unwrap(), HoldingSide::Liability);
    assert!("equity".parse::<HoldingSide>().is_err());
    assert_eq!(HoldingSide::Asset.store_name(), "Asset");
    assert_eq!(HoldingSide::Liability.store_name(), "Liability");
}
