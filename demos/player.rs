use std::{
    io::{self, Write as _},
    thread,
    time::Duration,
};

use parley::{
    play,
    writer::{Pause, Writer, WriterSettings},
    BasicStage, Control, Director, Line, Outcome, Playthrough, Response, ScriptLibrary, StageEvent,
};

fn main() {
    let (stage, library) = build_scene();
    let mut playthrough = Playthrough::new();
    playthrough.set_variable("player", "neighbour");

    let mut director = TerminalDirector {
        settings: WriterSettings {
            rich_text: false,
            ..WriterSettings::default()
        },
    };

    match play(
        &library,
        &stage,
        &mut playthrough,
        &mut director,
        "Bo",
        "doorstep",
    ) {
        Ok(Outcome::Completed) => println!("\nFIN\n"),
        Ok(outcome) => println!("\n{:?}\n", outcome),
        Err(err) => eprintln!("error: {}", err),
    }
}

fn build_scene() -> (BasicStage, ScriptLibrary) {
    let mut stage = BasicStage::new();
    stage.add_character("Bo", &["Happy", "Sad", "Toothy"]);
    stage.add_position("Left");
    stage.add_position("Right");

    let mut library = ScriptLibrary::new();

    library.add_script(
        "Bo",
        "doorstep",
        "bo happy left`Good evening, <$player>!{w=0.4} Lovely night, isn't it?`\t\
         `So...{wp=0.6} dark.{/wp} So quiet.`\t\
         bo toothy`May I come in?`invite_in=Of course, come in|refuse=I'd rather you didn't\t",
    );

    library.add_script(
        "Bo",
        "invite_in",
        "bo happy invite`How {b}kind{/b} of you.`\t\
         invited_bo=1`I promise this won't hurt a bit.`\t",
    );

    library.add_script(
        "Bo",
        "refuse",
        "bo sad`A shame.{w=0.5} A real shame.`\t\
         `Another night, then.`\t",
    );

    (stage, library)
}

struct TerminalDirector {
    settings: WriterSettings,
}

impl Director for TerminalDirector {
    fn stage_event(&mut self, event: &StageEvent) {
        if let StageEvent::Effect(effect) = event {
            println!(
                "  [{:?} -> {}]",
                effect.kind,
                effect.character.as_deref().unwrap_or("?")
            );
        }
    }

    fn deliver_line(&mut self, line: &Line) -> Control {
        if let Some(speaker) = &line.speaker {
            print!("{}: ", speaker);
        }

        let mut writer = Writer::new(&line.text, self.settings.clone());

        while let Some(step) = writer.step() {
            print!("\r");
            if let Some(speaker) = &line.speaker {
                print!("{}: ", speaker);
            }
            print!("{}", step.text);
            io::stdout().flush().unwrap();

            match step.pause {
                Pause::Beat(seconds) => thread::sleep(Duration::from_secs_f32(seconds)),
                Pause::Input { .. } => {
                    wait_for_enter();
                    writer.input();
                }
                Pause::VoiceOver => writer.voice_over_complete(),
                Pause::None => (),
            }
        }

        println!();
        Control::Proceed
    }

    fn request_choice(&mut self, responses: &[Response]) -> Option<usize> {
        println!("\nChoose:");

        for (i, response) in responses.iter().enumerate() {
            println!("  {}. {}", i + 1, response.text);
        }

        println!("     ---");
        println!("  0. Walk away");
        println!();

        loop {
            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();

            match input.trim().parse::<usize>() {
                Ok(0) => return None,
                Ok(i) if i > 0 && i <= responses.len() => return Some(i - 1),
                _ => println!("Not a valid option, try again:"),
            }
        }
    }

    fn missing_script(&mut self, character: &str, key: &str) {
        eprintln!("script '{}/{}' is missing", character, key);
    }
}

fn wait_for_enter() {
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
}
