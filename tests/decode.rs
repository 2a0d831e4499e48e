use std::path::{Path, PathBuf};

use hmm_decode::{Decoded, Engine, Model, Observation};

fn data_path(name: &str) -> PathBuf {
    Path::new(file!()).parent().unwrap().join("data").join(name)
}

fn two_state_model() -> Model {
    Model::from_path(data_path("two_state")).unwrap()
}

fn obs(symbols: &[&str]) -> Observation {
    Observation::from_outputs(symbols.iter().map(|s| s.to_string()).collect())
}

fn s(state: &str) -> Option<String> {
    Some(state.to_string())
}

#[test]
fn viterbi_decodes_alternating_states() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    let decoded = engine.viterbi(&obs(&["c", "v", "c"])).unwrap();
    assert_eq!(decoded, vec![s("C"), s("V"), s("C")]);
}

#[test]
fn forward_selects_the_final_state() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    assert_eq!(engine.forward(&obs(&["c", "v", "c"])).unwrap(), s("C"));
    assert_eq!(engine.forward(&obs(&["c", "v"])).unwrap(), s("V"));
}

#[test]
fn repeated_calls_return_identical_results() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    let observation = obs(&["c", "v", "c"]);
    assert_eq!(
        engine.forward(&observation).unwrap(),
        engine.forward(&observation).unwrap()
    );
    assert_eq!(
        engine.viterbi(&observation).unwrap(),
        engine.viterbi(&observation).unwrap()
    );
}

#[test]
fn ties_keep_the_first_enumerated_state() {
    // A and B are interchangeable, so every column is an exact tie
    let mut model = Model::new();
    model.insert_transition("#", "A", 0.5);
    model.insert_transition("#", "B", 0.5);
    model.insert_transition("A", "A", 0.5);
    model.insert_transition("A", "B", 0.5);
    model.insert_transition("B", "A", 0.5);
    model.insert_transition("B", "B", 0.5);
    model.insert_emission("A", "x", 1.0);
    model.insert_emission("B", "x", 1.0);
    assert_eq!(model.states(), ["A".to_string(), "B".to_string()]);

    let engine = Engine::new(&model);
    let first = model.states()[0].clone();
    assert_eq!(engine.forward(&obs(&["x"])).unwrap(), Some(first.clone()));
    assert_eq!(
        engine.viterbi(&obs(&["x", "x"])).unwrap(),
        vec![Some(first.clone()), Some(first)]
    );
}

#[test]
fn unknown_symbol_zeroes_the_column() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    // 'z' is emitted by no state; scores never recover once zeroed
    assert_eq!(
        engine.viterbi(&obs(&["c", "z", "c"])).unwrap(),
        vec![s("C"), None, None]
    );
    assert_eq!(engine.forward(&obs(&["c", "z", "c"])).unwrap(), None);
}

#[test]
fn single_state_chain_reduces_to_score_products() {
    let mut model = Model::new();
    model.insert_transition("#", "S", 1.0);
    model.insert_transition("S", "S", 1.0);
    model.insert_emission("S", "a", 0.6);
    model.insert_emission("S", "b", 0.4);

    let engine = Engine::new(&model);
    let observation = obs(&["a", "a", "b"]);
    assert_eq!(engine.forward(&observation).unwrap(), s("S"));
    assert_eq!(
        engine.viterbi(&observation).unwrap(),
        vec![s("S"), s("S"), s("S")]
    );
}

#[test]
fn empty_observation_has_no_winner() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    assert_eq!(engine.forward(&obs(&[])).unwrap(), None);
    assert_eq!(engine.viterbi(&obs(&[])).unwrap(), vec![]);
}

#[test]
fn forward_batch_preserves_input_order() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    let results = engine.forward_path(data_path("two_state.obs")).unwrap();
    assert_eq!(results, vec![s("C"), s("V")]);
}

#[test]
fn viterbi_batch_tags_inputs_one_based() {
    let model = two_state_model();
    let engine = Engine::new(&model);
    let results = engine.viterbi_reader(&b"c v c\n\nc v\n"[..]).unwrap();
    assert_eq!(
        results,
        vec![
            Decoded {
                index: 1,
                states: vec![s("C"), s("V"), s("C")],
            },
            Decoded {
                index: 2,
                states: vec![s("C"), s("V")],
            },
        ]
    );
}
