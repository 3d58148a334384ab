use keepdrop::{BranchKey, BranchSelector, ContentConfig};

fn main() {
    let config =
        ContentConfig::from_file("demos/event_content.txt").expect("failed to load event content");

    println!("{config}");

    let universe: Vec<BranchKey> = [
        "recoMuons_muons__RECO",
        "recoPFCandidates_particleFlow_muons_RECO",
        "recoVertexs_offlinePrimaryVertices__RECO",
        "recoGenParticles_genParticles__SIM",
        "Run3ScoutingMuons_hltScoutingMuonPacker__HLT",
        "recoTracks_generalTracks__RECO",
    ]
    .into_iter()
    .map(|name| name.parse().expect("invalid branch name"))
    .collect();

    for block in config.blocks() {
        let selector = BranchSelector::new(block.rules().clone(), universe.clone());
        println!();
        println!("{}.{}:", block.name(), block.direction());
        for key in selector.kept() {
            println!("  keep {key}");
        }
    }
}
