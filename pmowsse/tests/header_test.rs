use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, TimeZone, Utc};
use pmowsse::{
    FixedClock, FixedRandom, Nonce, PasswordType, SecurityOptions, WsSecurity, WsseConfig,
    password_digest,
};
use uuid::Uuid;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 30).unwrap())
}

fn random() -> FixedRandom {
    FixedRandom {
        seed: 0.123456789,
        message_id: Uuid::parse_str("a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d").unwrap(),
    }
}

/// Extrait le contenu texte du premier élément `tag`
fn element_text<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = xml.find(&format!("<{tag}"))?;
    let start = open + xml[open..].find('>')? + 1;
    let end = start + xml[start..].find(&format!("</{tag}>"))?;
    Some(&xml[start..end])
}

fn parse_instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
}

#[test]
fn test_digest_example() {
    let options = SecurityOptions {
        password_type: PasswordType::PasswordDigest,
        has_timestamp: false,
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).to_xml();

    assert!(xml.contains("Type=\"http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordDigest\""));
    assert_eq!(xml.matches("<wsse:Nonce ").count(), 1);
    assert_eq!(xml.matches("<wsse:Password ").count(), 1);
    assert!(!xml.contains("wsu:Timestamp"));

    let token = element_text(&xml, "wsse:UsernameToken").unwrap();
    assert!(token.contains("<wsu:Created>"));
}

#[test]
fn test_digest_forces_nonce_even_when_disabled() {
    let options = SecurityOptions {
        password_type: PasswordType::PasswordDigest,
        has_nonce: Some(false),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).render(&clock(), &random());
    assert_eq!(xml.matches("<wsse:Nonce ").count(), 1);
}

#[test]
fn test_digest_value_verifies() {
    let security = WsSecurity::with_password_type("agent", "s3cr3t", "PasswordDigest");
    let xml = security.render(&clock(), &random());

    let created = element_text(&xml, "wsu:Created").unwrap();
    let nonce = BASE64
        .decode(element_text(&xml, "wsse:Nonce").unwrap())
        .unwrap();
    assert_eq!(nonce.len(), 16);

    let digest = element_text(&xml, "wsse:Password").unwrap();
    assert_eq!(digest.len(), 28);
    assert_eq!(digest, password_digest(&nonce, created, "s3cr3t"));
}

#[test]
fn test_text_without_nonce() {
    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).to_xml();
    assert!(!xml.contains("wsse:Nonce"));
    assert!(xml.contains("#PasswordText\">p</wsse:Password>"));

    let explicit_false = SecurityOptions {
        has_nonce: Some(false),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", explicit_false).to_xml();
    assert!(!xml.contains("wsse:Nonce"));
}

#[test]
fn test_text_with_nonce_is_base64() {
    let options = SecurityOptions {
        has_nonce: Some(true),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).render(&clock(), &random());

    let expected = Nonce::derive("2024-02-29T23:59:30Z", 0.123456789);
    assert_eq!(element_text(&xml, "wsse:Nonce"), Some(expected.encoded().as_str()));
    assert!(xml.contains("#PasswordText\">p</wsse:Password>"));
}

#[test]
fn test_unknown_password_type_renders_text() {
    let security = WsSecurity::with_password_type("u", "p", "PasswordSha256");
    assert_eq!(security.password_type(), PasswordType::PasswordText);

    let xml = security.render(&clock(), &random());
    assert!(xml.contains("#PasswordText\">p</wsse:Password>"));
    assert!(!xml.contains("#PasswordDigest"));
    assert!(!xml.contains("wsse:Nonce"));
}

#[test]
fn test_timestamp_expires_after_ten_minutes() {
    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).to_xml();

    let timestamp = element_text(&xml, "wsu:Timestamp").unwrap();
    let created = element_text(timestamp, "wsu:Created").unwrap();
    let expires = element_text(timestamp, "wsu:Expires").unwrap();
    assert_eq!(created.len(), "YYYY-MM-DDTHH:MM:SSZ".len());
    assert!(created.ends_with('Z'));
    assert_eq!(
        (parse_instant(expires) - parse_instant(created)).num_seconds(),
        600
    );
    assert!(xml.contains(&format!("wsu:Id=\"Timestamp-{created}\"")));
}

#[test]
fn test_timestamp_fixed_clock() {
    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).render(&clock(), &random());
    assert!(xml.contains(
        "<wsu:Timestamp wsu:Id=\"Timestamp-2024-02-29T23:59:30Z\">\
         <wsu:Created>2024-02-29T23:59:30Z</wsu:Created>\
         <wsu:Expires>2024-03-01T00:09:30Z</wsu:Expires>\
         </wsu:Timestamp>"
    ));
    assert!(xml.contains("wsu:Id=\"SecurityToken-2024-02-29T23:59:30Z\""));
}

#[test]
fn test_timestamp_is_first_child_of_security() {
    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).render(&clock(), &random());

    let security = xml.find("<wsse:Security ").unwrap();
    let security_open_end = security + xml[security..].find('>').unwrap() + 1;
    let timestamp = xml.find("<wsu:Timestamp").unwrap();
    let token = xml.find("<wsse:UsernameToken").unwrap();

    assert_eq!(timestamp, security_open_end);
    assert!(timestamp < token);
}

#[test]
fn test_empty_actor_emits_no_attribute() {
    let options = SecurityOptions {
        actor: Some(String::new()),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).to_xml();
    assert!(!xml.contains("soap:actor"));
}

#[test]
fn test_without_timestamp_or_token_created() {
    let options = SecurityOptions {
        has_timestamp: false,
        has_token_created: false,
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).to_xml();
    assert!(!xml.contains("wsu:Timestamp"));
    assert!(!xml.contains("wsu:Created"));
}

#[test]
fn test_actor_and_must_understand() {
    let options = SecurityOptions {
        actor: Some("http://example.test/actor".to_string()),
        must_understand: Some(true),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", options).to_xml();
    assert!(xml.contains(
        "<wsse:Security soap:actor=\"http://example.test/actor\" soap:mustUnderstand=\"1\" xmlns:wsse="
    ));

    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).to_xml();
    assert!(!xml.contains("soap:actor"));
    assert!(!xml.contains("soap:mustUnderstand"));

    let not_understood = SecurityOptions {
        must_understand: Some(false),
        ..Default::default()
    };
    let xml = WsSecurity::new("u", "p", not_understood).to_xml();
    assert!(!xml.contains("soap:mustUnderstand"));
}

#[test]
fn test_fragment_order_and_message_id() {
    let xml = WsSecurity::new("u", "p", SecurityOptions::default()).render(&clock(), &random());

    assert!(xml.starts_with(
        "<ns2:MessageID xmlns:ns2=\"http://www.w3.org/2005/08/addressing\">A1B2C3D4-E5F6-4A7B-8C9D-0E1F2A3B4C5D</ns2:MessageID>"
    ));
    let security = xml.find("<wsse:Security ").unwrap();
    let to = xml.find("</ns2:To>").unwrap();
    let hosted = xml.find("<ns4:AMA_SecurityHostedUser").unwrap();
    assert!(to < security && security < hosted);
    assert!(xml.ends_with("</ns4:AMA_SecurityHostedUser>"));
}

#[test]
fn test_each_render_is_fresh() {
    let security = WsSecurity::with_password_type("u", "p", "PasswordDigest");
    let first = security.to_xml();
    let second = security.to_xml();

    assert_ne!(
        element_text(&first, "ns2:MessageID"),
        element_text(&second, "ns2:MessageID")
    );
    assert_ne!(
        element_text(&first, "wsse:Nonce"),
        element_text(&second, "wsse:Nonce")
    );
}

#[test]
fn test_concurrent_renders() {
    let security = WsSecurity::with_password_type("u", "p", "PasswordDigest");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| security.to_xml()))
            .collect();
        for handle in handles {
            let xml = handle.join().unwrap();
            assert_eq!(xml.matches("<wsse:Nonce ").count(), 1);
        }
    });
}

#[test]
fn test_config_file_roundtrip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("pmowsse.yaml");
    std::fs::write(
        &path,
        r#"
security:
  username: WSAGENT
  password: pw
  options:
    password_type: PasswordDigest
    actor: urn:gateway
addressing:
  action: urn:custom:action
hosted_user:
  pseudo_city_code: NCE1A0950
"#,
    )?;

    let security = WsseConfig::load_with_env(&path, Vec::new())?.into_security()?;
    let xml = security.render(&clock(), &random());

    assert!(xml.contains("<wsse:Username>WSAGENT</wsse:Username>"));
    assert!(xml.contains("#PasswordDigest"));
    assert!(xml.contains("soap:actor=\"urn:gateway\""));
    assert!(xml.contains(">urn:custom:action</ns2:Action>"));
    assert!(xml.contains(">https://nodeD2.test.webservices.amadeus.com/1ASIWIHAIHA</ns2:To>"));
    assert!(xml.contains("PseudoCityCode=\"NCE1A0950\" AgentDutyCode=\"SU\""));
    Ok(())
}

#[test]
fn test_missing_config_file_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let env = vec![
        ("PMOWSSE__SECURITY__USERNAME".to_string(), "envuser".to_string()),
        ("PMOWSSE__SECURITY__PASSWORD".to_string(), "envpass".to_string()),
    ];
    let security = WsseConfig::load_with_env(dir.path().join("absent.yaml"), env)?.into_security()?;

    assert_eq!(security.username(), "envuser");
    assert_eq!(security.password_type(), PasswordType::PasswordText);
    assert!(security.to_xml().contains("#PasswordText\">envpass</wsse:Password>"));
    Ok(())
}
