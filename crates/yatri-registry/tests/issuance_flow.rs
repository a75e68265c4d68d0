//! End-to-end registration flow: form → issued ID → ledger submission →
//! threshold seal, exercised through public APIs only.

use serde_json::json;
use yatri_crypto::CipherSession;
use yatri_ledger::Ledger;
use yatri_registry::{DigitalId, RegistrationForm};

fn form(name: &str, aadhaar: &str) -> RegistrationForm {
    RegistrationForm {
        full_name: name.to_string(),
        aadhaar: aadhaar.to_string(),
        email: None,
        phone: Some("9998887776".to_string()),
        itinerary: "Agra, 2 days".to_string(),
        emergency_contact: "9876543210".to_string(),
        emergency_contact_name: None,
    }
}

#[test]
fn three_registrations_seal_one_block() {
    let session = CipherSession::generate();
    let mut ledger = Ledger::new();

    let ids: Vec<DigitalId> = [
        form("Asha Verma", "1111-2222-3333"),
        form("Birju Rao", "4444-5555-6666"),
        form("Chitra Nair", "7777-8888-9999"),
    ]
    .iter()
    .map(|f| DigitalId::issue(&session, f).unwrap())
    .collect();

    let mut sealed = None;
    for id in &ids {
        sealed = ledger.add_transaction(id.to_record().unwrap()).unwrap();
    }
    let block = sealed.expect("third registration seals a block");

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.pending_len(), 0);
    ledger.verify_integrity().unwrap();

    // The sealed records carry the generated tourist IDs in order.
    let recorded: Vec<_> = block
        .transactions()
        .iter()
        .map(|r| r.get("id").and_then(|v| v.as_str()).unwrap().to_string())
        .collect();
    let issued: Vec<_> = ids.iter().map(|id| id.id.as_str().to_string()).collect();
    assert_eq!(recorded, issued);
}

#[test]
fn issued_ids_submit_directly_as_records() {
    let session = CipherSession::generate();
    let mut ledger = Ledger::new();

    // A DigitalId serializes to a field map, so it is itself a valid record.
    let id = DigitalId::issue(&session, &form("Asha Verma", "1111-2222-3333")).unwrap();
    ledger.add_transaction(&id).unwrap();
    assert_eq!(ledger.pending_len(), 1);

    let pending = &ledger.pending()[0];
    assert_eq!(
        pending.get("itinerary"),
        Some(&json!("Agra, 2 days"))
    );
    // Ciphertext, not the clear name, is what reaches the ledger.
    assert_ne!(pending.get("name"), Some(&json!("Asha Verma")));
}

#[test]
fn ledgered_identity_fields_reveal_only_with_issuing_session() {
    let session = CipherSession::generate();
    let original = form("Asha Verma", "1111-2222-3333");
    let id = DigitalId::issue(&session, &original).unwrap();

    let revealed = id.reveal(&session).unwrap();
    assert_eq!(revealed, original);

    let stranger = CipherSession::generate();
    assert_ne!(id.reveal(&stranger).ok(), Some(original));
}
