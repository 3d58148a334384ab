use keepdrop::{BranchKey, RuleList, RuleListBuilder};

fn main() {
    // The same list, parsed from command lines and built programmatically
    let rules = RuleList::parse([
        "drop *",
        "keep recoMuons_muons_*_*",
        "keep *_particleFlow_muons_*",
        "drop recoMuons_muons_cosmicVariant_*",
    ])
    .expect("failed to parse rules");

    let built = RuleListBuilder::new()
        .drop("*")
        .keep("recoMuons_muons_*_*")
        .keep("*_particleFlow_muons_*")
        .drop("recoMuons_muons_cosmicVariant_*")
        .build()
        .expect("failed to build rules");
    assert_eq!(rules, built);

    println!("{rules}");

    let branches = [
        "recoMuons_muons__RECO",
        "recoMuons_muons_cosmicVariant_RECO",
        "recoPFCandidates_particleFlow_muons_RECO",
        "recoTracks_generalTracks__RECO",
    ];

    for name in branches {
        let key: BranchKey = name.parse().expect("invalid branch name");
        println!("{key}: {}", rules.decide(&key));
    }

    let report = rules.evaluate_detailed(&BranchKey::new("recoMuons", "muons", "cosmicVariant", "RECO"));
    println!();
    println!("{report}");
    println!("Matching rules: {:?}", report.matched());
}
