//! Library-level scenario tests for the session and assignment engine.
//!
//! Drives `Session` the way the command loop does and checks ownership,
//! rendered fills, and the status line after each step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use mapcolor::assign::{assign, unassign};
use mapcolor::board::{Color, CountryId, CountryRegistry, MapState};
use mapcolor::config::SessionConfig;
use mapcolor::render::{compute_fills, sync, FillTable};
use mapcolor::session::{Mode, Session, SessionError};

const TEXAS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g class="state">
    <path id="TX_01" d="M0 0 L1 1"/>
    <path id="TX_02" d="M1 1 L2 2"/>
  </g>
</svg>"#;

const CO1: CountryId = CountryId(1);
const CO2: CountryId = CountryId(2);

fn loaded_session() -> Session {
    let mut session = Session::new(&SessionConfig::default()).unwrap();
    session.load_map(TEXAS).unwrap();
    session
}

fn fill(session: &Session, id: &str) -> String {
    session.painter().get(id).unwrap().to_string()
}

fn territories(session: &Session, id: CountryId) -> Vec<String> {
    session
        .state()
        .countries
        .get(id)
        .unwrap()
        .sorted_territories()
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn end_to_end_assign_transfer_remove() {
    let mut s = loaded_session();
    assert_eq!(fill(&s, "TX_01"), "#EEEEEE");
    assert_eq!(fill(&s, "TX_02"), "#EEEEEE");

    s.unlock("CHANGE_ME").unwrap();

    s.select_country(CO1).unwrap();
    s.click("TX_01").unwrap();
    assert_eq!(fill(&s, "TX_01"), "#FF0000");
    assert_eq!(territories(&s, CO1), vec!["TX_01"]);

    s.select_country(CO2).unwrap();
    s.click("TX_01").unwrap();
    assert_eq!(fill(&s, "TX_01"), "#00FF00");
    assert!(territories(&s, CO1).is_empty());
    assert_eq!(territories(&s, CO2), vec!["TX_01"]);

    s.select_remove().unwrap();
    s.click("TX_01").unwrap();
    assert_eq!(fill(&s, "TX_01"), "#EEEEEE");
    assert!(territories(&s, CO2).is_empty());
    assert_eq!(s.state().provinces.get("TX_01").unwrap().owner(), None);

    assert_eq!(fill(&s, "TX_02"), "#EEEEEE");
    assert_eq!(s.state().check_invariant(), Ok(()));
}

#[test]
fn lock_gates_every_mutation() {
    let mut s = loaded_session();

    // Locked: neither mode selection nor clicks reach the map.
    assert!(matches!(s.select_country(CO1), Err(SessionError::Locked)));
    assert!(matches!(s.click("TX_01"), Err(SessionError::Locked)));
    assert_eq!(s.state().provinces.get("TX_01").unwrap().owner(), None);

    s.unlock("CHANGE_ME").unwrap();
    s.select_country(CO1).unwrap();
    s.click("TX_01").unwrap();
    assert_eq!(s.state().provinces.get("TX_01").unwrap().owner(), Some(CO1));

    s.lock();
    assert_eq!(s.mode(), Mode::NoneSelected);

    // Re-unlocking does not restore the previous mode.
    s.unlock("CHANGE_ME").unwrap();
    assert!(matches!(s.click("TX_02"), Err(SessionError::NoModeSelected)));
    assert_eq!(s.state().provinces.get("TX_02").unwrap().owner(), None);

    s.select_country(CO1).unwrap();
    s.click("TX_02").unwrap();
    assert_eq!(territories(&s, CO1), vec!["TX_01", "TX_02"]);
}

#[test]
fn every_action_sets_a_status() {
    let mut s = loaded_session();
    let mut seen = Vec::new();

    let _ = s.click("TX_01");
    seen.push(s.status().to_string());
    let _ = s.unlock("wrong");
    seen.push(s.status().to_string());
    let _ = s.unlock("CHANGE_ME");
    seen.push(s.status().to_string());
    let _ = s.click("TX_01");
    seen.push(s.status().to_string());
    let _ = s.select_country(CO2);
    seen.push(s.status().to_string());
    let _ = s.click("TX_01");
    seen.push(s.status().to_string());
    s.lock();
    seen.push(s.status().to_string());

    assert!(seen.iter().all(|m| !m.is_empty()));
    for pair in seen.windows(2) {
        assert_ne!(pair[0], pair[1], "consecutive actions should report different outcomes");
    }
}

#[test]
fn unknown_ids_leave_state_untouched() {
    let mut state = MapState::new(CountryRegistry::standard());
    state.provinces.insert("TX_01");
    assign(&mut state, "TX_01", CO1).unwrap();
    let before = state.clone();

    assert!(assign(&mut state, "nonexistent", CO1).is_err());
    assert!(unassign(&mut state, "nonexistent").is_err());
    assert!(assign(&mut state, "TX_01", CountryId(77)).is_err());
    assert_eq!(state, before);
}

#[test]
fn random_sequences_preserve_invariant() {
    let ids: Vec<String> = (0..40).map(|i| format!("P_{:02}", i)).collect();
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _round in 0..20 {
        let mut state = MapState::new(CountryRegistry::standard());
        for id in &ids {
            state.provinces.insert(id);
        }

        for _ in 0..500 {
            let province = &ids[rng.gen_range(0..ids.len())];
            if rng.gen_bool(0.25) {
                unassign(&mut state, province).unwrap();
            } else {
                let country = CountryId(rng.gen_range(1..=3));
                assign(&mut state, province, country).unwrap();
            }
            assert_eq!(state.check_invariant(), Ok(()));
        }

        let owned: usize = state.countries.iter().map(|c| c.territories().len()).sum();
        assert_eq!(owned + state.neutral_count(), ids.len());
    }
}

#[test]
fn render_matches_owner_colors_after_random_edits() {
    let ids: Vec<String> = (0..25).map(|i| format!("R{}", i)).collect();
    let mut state = MapState::new(CountryRegistry::standard());
    for id in &ids {
        state.provinces.insert(id);
    }
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..200 {
        let province = &ids[rng.gen_range(0..ids.len())];
        match rng.gen_range(0..4) {
            0 => {
                unassign(&mut state, province).unwrap();
            }
            n => {
                assign(&mut state, province, CountryId(n)).unwrap();
            }
        }
    }

    let neutral = Color::neutral();
    let mut first = FillTable::new();
    let mut second = FillTable::new();
    sync(&state, &neutral, &mut first);
    sync(&state, &neutral, &mut second);
    assert_eq!(first, second);

    for (id, color) in compute_fills(&state, &neutral) {
        let expected = match state.provinces.get(&id).unwrap().owner() {
            Some(owner) => state.countries.get(owner).unwrap().color().clone(),
            None => neutral.clone(),
        };
        assert_eq!(color, expected, "wrong fill for {}", id);
        assert_eq!(first.get(&id), Some(&expected));
    }
}

#[test]
fn custom_config_drives_session() {
    let config = SessionConfig::from_json(
        r##"{
            "secret": "open sesame",
            "neutral_color": "#101010",
            "region_group_class": null,
            "countries": [ { "id": 42, "name": "Answer", "color": "#abcdef" } ]
        }"##,
    )
    .unwrap();
    let mut s = Session::new(&config).unwrap();
    s.load_map(r#"<svg><path id="loose"/></svg>"#).unwrap();
    assert_eq!(fill(&s, "loose"), "#101010");

    s.unlock(" open sesame ").unwrap();
    s.select_country(CountryId(42)).unwrap();
    s.click("loose").unwrap();
    assert_eq!(fill(&s, "loose"), "#ABCDEF");
    assert!(matches!(s.select_country(CO1), Err(SessionError::UnknownCountry(_))));
}
