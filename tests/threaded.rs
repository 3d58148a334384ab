use std::sync::Arc;
use std::thread;

use keepdrop::{BranchKey, BranchSelector, RuleList};

fn muon_rules() -> RuleList {
    RuleList::parse([
        "drop *",
        "keep recoMuons_muons_*_*",
        "keep *_particleFlow_muons_*",
        "drop recoMuons_muons_cosmicVariant_*",
    ])
    .unwrap()
}

#[test]
fn evaluate_across_threads() {
    let rules = Arc::new(muon_rules());

    let branches = vec![
        BranchKey::new("recoMuons", "muons", "", "RECO"),
        BranchKey::new("recoMuons", "muons", "cosmicVariant", "RECO"),
        BranchKey::new("recoPFCandidates", "particleFlow", "muons", "RECO"),
        BranchKey::new("recoTracks", "generalTracks", "", "RECO"),
    ];

    let handles: Vec<_> = branches
        .into_iter()
        .map(|key| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || rules.should_keep(&key))
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true, false]);
}

#[test]
fn shared_selector_gives_same_answers_on_every_thread() {
    let universe: Vec<BranchKey> = ["muons", "particleFlow", "generalTracks", "ak4PFJets"]
        .into_iter()
        .flat_map(|module| {
            ["", "muons", "cosmicVariant"]
                .into_iter()
                .map(move |instance| BranchKey::new("recoMuons", module, instance, "RECO"))
        })
        .collect();

    let rules = Arc::new(muon_rules());
    let selector = Arc::new(BranchSelector::new(Arc::clone(&rules), universe.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let selector = Arc::clone(&selector);
            let universe = universe.clone();
            thread::spawn(move || {
                universe
                    .iter()
                    .map(|key| selector.should_keep(key))
                    .collect::<Vec<bool>>()
            })
        })
        .collect();

    let expected: Vec<bool> = universe.iter().map(|key| rules.should_keep(key)).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
