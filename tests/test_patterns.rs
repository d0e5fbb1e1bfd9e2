use etphone::patterns::fixed_line::{self, Region};
use etphone::{
    add_country_code, classify, classify_default, extract_number, get_all_matchers, Classification, Filters,
    PhoneType, Provider, ProviderFilter, TypeFilter,
};
use proptest::prelude::*;

#[test]
fn test_ethio_mobile_with_country_code() {
    let result = classify_default("+251911234567");
    assert_eq!(
        result,
        Classification {
            is_valid: true,
            phone_number: Some("+251911234567".to_string()),
            provider: Some(Provider::EthioTelecom),
            phone_type: Some(PhoneType::Mobile),
        }
    );
}

#[test]
fn test_formatted_inputs_classify_alike() {
    let inputs = vec![
        "+251 91 123 4567",
        "251-911-234-567",
        "(0911) 23 45 67",
        "0911234567",
        "911234567",
    ];

    for input in inputs {
        let result = classify_default(input);
        assert_eq!(result.phone_number.as_deref(), Some("+251911234567"), "input: {}", input);
        assert_eq!(result.provider, Some(Provider::EthioTelecom), "input: {}", input);
    }
}

#[test]
fn test_special_number_with_all_types() {
    let result = classify("5678", &Filters::default().with_types(vec![TypeFilter::All]));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "isValid": true,
            "phoneNumber": "5678",
            "provider": "Ethio telecom",
            "phoneType": "Special"
        })
    );
}

#[test]
fn test_five_digits_never_match() {
    let filter_sets = vec![
        Filters::default(),
        Filters::all(),
        Filters::new(vec![TypeFilter::Special, TypeFilter::ShortCode], vec![ProviderFilter::EthioTelecom]),
        Filters::new(vec![TypeFilter::Mobile], vec![ProviderFilter::Safaricom]),
    ];

    for filters in filter_sets {
        assert_eq!(classify("12345", &filters), Classification::invalid());
    }
}

#[test]
fn test_fixed_line_regions() {
    let cases = vec![
        ("0111234567", Region::AddisAbaba),
        ("+251 22 111 2233", Region::SouthEast),
        ("0251112233", Region::East),
        ("0344401234", Region::North),
        ("0462201234", Region::South),
        ("0471112233", Region::SouthWest),
        ("0576611223", Region::West),
        ("0582201234", Region::NorthWest),
    ];

    for (input, region) in cases {
        let result = classify_default(input);
        assert_eq!(result.phone_type, Some(PhoneType::FixedLine), "input: {}", input);
        let number = result.phone_number.unwrap();
        assert_eq!(fixed_line::region(&number), Some(region), "input: {}", input);
    }
}

#[test]
fn test_matchers_in_priority_order() {
    let order: Vec<(Provider, PhoneType, bool)> = get_all_matchers()
        .iter()
        .map(|m| (m.provider(), m.phone_type(), m.requires_country_code()))
        .collect();

    assert_eq!(
        order,
        vec![
            (Provider::EthioTelecom, PhoneType::Mobile, true),
            (Provider::Safaricom, PhoneType::Mobile, true),
            (Provider::EthioTelecom, PhoneType::Special, false),
            (Provider::EthioTelecom, PhoneType::ShortCode, false),
            (Provider::EthioTelecom, PhoneType::FixedLine, true),
        ]
    );
}

#[test]
fn test_pattern_matchers() {
    let matchers = get_all_matchers();

    let safaricom = &matchers[1];
    assert!(safaricom.matches("+251711234567"));
    assert!(!safaricom.matches("+251911234567"));

    let short_code = &matchers[3];
    assert!(short_code.matches("991"));
    assert!(!short_code.matches("+251991"));
}

proptest! {
    #[test]
    fn ethio_mobiles_always_validate(subscriber in "[0-9]{8}", coded in any::<bool>()) {
        let input = if coded {
            format!("+2519{}", subscriber)
        } else {
            format!("9{}", subscriber)
        };
        let result = classify_default(input.as_str());

        prop_assert!(result.is_valid);
        prop_assert_eq!(result.provider, Some(Provider::EthioTelecom));
        prop_assert_eq!(result.phone_type, Some(PhoneType::Mobile));
        prop_assert_eq!(result.phone_number, Some(format!("+2519{}", subscriber)));
    }

    #[test]
    fn safaricom_mobiles_always_validate(subscriber in "[0-9]{8}") {
        let result = classify_default(format!("07{}", subscriber));

        prop_assert!(result.is_valid);
        prop_assert_eq!(result.provider, Some(Provider::Safaricom));
        prop_assert_eq!(result.phone_type, Some(PhoneType::Mobile));
    }

    #[test]
    fn special_only_filter_rejects_mobiles(subscriber in "[0-9]{8}", prefix in "[79]") {
        let filters = Filters::default().with_types(vec![TypeFilter::Special]);
        let result = classify(format!("+251{}{}", prefix, subscriber), &filters);
        prop_assert_eq!(result, Classification::invalid());
    }

    #[test]
    fn normalized_then_coded_is_stable(input in "[+0-9 ()-]{0,20}") {
        let coded = add_country_code(&extract_number(&input));
        prop_assert_eq!(add_country_code(&coded), coded.clone());
    }
}
