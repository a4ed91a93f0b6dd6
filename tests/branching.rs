use parley::*;

fn mock_stage() -> BasicStage {
    let mut stage = BasicStage::new();
    stage.add_character("Bo", &["Happy"]);
    stage
}

fn resume(
    conversation: &mut Conversation,
    playthrough: &mut Playthrough,
) -> Prompt {
    conversation.resume(playthrough, &mut Vec::new()).unwrap()
}

#[test]
fn selecting_a_linked_response_diverts_and_skips_the_rest() {
    let document = "bo`Will you come in?`yes=Of course|no=Never\tbo`Unreachable.`\t";

    let mut conversation = parse_conversation(document, &mock_stage());
    let mut playthrough = Playthrough::new();

    conversation.start().unwrap();

    assert!(matches!(
        resume(&mut conversation, &mut playthrough),
        Prompt::Line(_)
    ));

    match resume(&mut conversation, &mut playthrough) {
        Prompt::Choice(responses) => {
            assert_eq!(responses.len(), 2);
            assert_eq!(responses[0].text, "Of course");
        }
        other => panic!("expected a choice but got {:?}", other),
    }

    conversation.make_choice(0).unwrap();

    assert_eq!(
        resume(&mut conversation, &mut playthrough),
        Prompt::Divert("yes".to_string())
    );
    assert_eq!(
        conversation.outcome(),
        Some(&Outcome::Diverted("yes".to_string()))
    );
}

#[test]
fn informational_responses_with_empty_links_do_not_divert() {
    let document = "bo`Anything else?`=Just looking|leave=Goodbye\tbo`Take your time.`\t";

    let mut conversation = parse_conversation(document, &mock_stage());
    let mut playthrough = Playthrough::new();

    conversation.start().unwrap();

    resume(&mut conversation, &mut playthrough);
    resume(&mut conversation, &mut playthrough);
    conversation.make_choice(0).unwrap();

    match resume(&mut conversation, &mut playthrough) {
        Prompt::Line(line) => assert_eq!(line.text, "Take your time."),
        other => panic!("expected the next line but got {:?}", other),
    }

    assert_eq!(resume(&mut conversation, &mut playthrough), Prompt::Done);
}

#[test]
fn choices_scale_beyond_four_options() {
    let links = (0..6)
        .map(|i| format!("key_{i}=Option {i}"))
        .collect::<Vec<_>>()
        .join("|");
    let document = format!("bo`Pick.`{links}\t");

    let mut conversation = parse_conversation(&document, &mock_stage());
    let mut playthrough = Playthrough::new();

    conversation.start().unwrap();
    resume(&mut conversation, &mut playthrough);

    match resume(&mut conversation, &mut playthrough) {
        Prompt::Choice(responses) => assert_eq!(responses.len(), 6),
        other => panic!("expected a choice but got {:?}", other),
    }

    conversation.make_choice(5).unwrap();

    assert_eq!(
        resume(&mut conversation, &mut playthrough),
        Prompt::Divert("key_5".to_string())
    );
}

#[test]
fn conditions_divert_before_any_content_of_the_item_is_shown() {
    let document = "\
bo`Evening.`\t\
met_bo==1>bo_return`Unreachable when met.`\t\
met_bo=1`First time, then.`\t";

    let mut playthrough = Playthrough::new();
    playthrough.set_variable("met_bo", "1");

    let mut conversation = parse_conversation(document, &mock_stage());
    conversation.start().unwrap();

    assert!(matches!(
        resume(&mut conversation, &mut playthrough),
        Prompt::Line(_)
    ));
    assert_eq!(
        resume(&mut conversation, &mut playthrough),
        Prompt::Divert("bo_return".to_string())
    );
}

#[test]
fn a_choice_item_without_text_presents_its_responses_immediately() {
    let document = "bo` `stay=Stay|go=Go\t";

    // Text is whitespace only, so it trims to empty and the item goes
    // straight to its responses
    let mut conversation = parse_conversation(document, &mock_stage());
    let mut playthrough = Playthrough::new();

    conversation.start().unwrap();

    match resume(&mut conversation, &mut playthrough) {
        Prompt::Choice(responses) => assert_eq!(responses.len(), 2),
        other => panic!("expected a choice but got {:?}", other),
    }
}
