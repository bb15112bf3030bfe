//! Line-oriented terminal screens over the session engines.

use std::io::{self, Write};
use std::sync::Arc;

use study_core::Clock;
use study_core::model::{Answer, Question, QuestionKind, StudySet, StudySettings};
use study_core::time::format_clock_time;
use study_services::sessions::CardFace;
use study_services::tutor::QUICK_QUESTIONS;
use study_services::{
    ChatSession, FlashcardSession, KeywordTutor, LiveQuiz, MaterialGenerator, Pacer, QuizPhase,
    QuizStep, ScoreBand, TopicSource,
};

type ScreenResult = Result<(), Box<dyn std::error::Error>>;

/// Read one line from stdin without blocking the runtime; `None` on EOF.
async fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    })
    .await
    .map_err(io::Error::other)?
}

//
// ─── MATERIALS ─────────────────────────────────────────────────────────────────
//

fn print_material(set: &StudySet) {
    let material = set.material();
    if material.is_empty() {
        println!("No study material for {}.", set.topic());
        return;
    }

    println!("{} ({})", set.topic(), material.level());
    println!();
    println!("{}", material.summary());
    if !material.key_points().is_empty() {
        println!();
        println!("Key points:");
        for point in material.key_points() {
            println!("  • {point}");
        }
    }
    if !material.concepts().is_empty() {
        println!();
        println!("Simple explanations:");
        for concept in material.concepts() {
            match concept.icon() {
                Some(icon) => println!("  {icon} {}", concept.concept()),
                None => println!("  {}", concept.concept()),
            }
            println!("    {}", concept.explanation());
        }
    }
}

pub fn materials(material: &StudySet) -> ScreenResult {
    print_material(material);
    Ok(())
}

//
// ─── FLASHCARDS ────────────────────────────────────────────────────────────────
//

pub async fn flashcards(material: &StudySet, settings: &StudySettings) -> ScreenResult {
    let pacer = Pacer::new(settings);
    let mut session = FlashcardSession::new(material.cards().clone());
    println!("Flashcards: {} study set", material.topic());

    loop {
        let Some(card) = session.current_card() else {
            println!("This study set has no flashcards.");
            return Ok(());
        };
        let progress = session.progress();
        println!();
        println!(
            "Card {} of {} [{}]{}",
            progress.position.unwrap_or(0),
            progress.total,
            card.difficulty(),
            if session.is_current_studied() { " ✓ studied" } else { "" }
        );
        match session.visible_face() {
            Some(CardFace::Front(text)) => println!("Question: {text}"),
            Some(CardFace::Back(text)) => println!("Answer: {text}"),
            None => {}
        }
        println!(
            "studied {} | remaining {} | progress {}%",
            progress.studied, progress.remaining, progress.percent
        );

        let Some(input) = read_line("[f]lip [n]ext [p]rev [s]huffle [m]ark [q]uit > ").await? else {
            return Ok(());
        };
        match input.trim() {
            "f" | "" => session.flip(),
            "n" => session.next(),
            "p" => session.previous(),
            "s" => session.shuffle(),
            "m" => {
                pacer.mark_studied(&mut session).await;
            }
            "q" => return Ok(()),
            other => println!("unknown command: {other}"),
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

fn parse_answer(question: &Question, input: &str) -> Option<Answer> {
    let input = input.trim();
    match question.kind() {
        QuestionKind::MultipleChoice => {
            let choice = input.parse::<usize>().ok()?;
            let option = question.options().get(choice.checked_sub(1)?)?;
            Some(Answer::text(option.clone()))
        }
        QuestionKind::TrueFalse => match input.to_lowercase().as_str() {
            "t" | "true" => Some(Answer::Bool(true)),
            "f" | "false" => Some(Answer::Bool(false)),
            _ => None,
        },
        QuestionKind::OpenEnded => Some(Answer::text(input)),
    }
}

fn print_question(quiz: &LiveQuiz) {
    quiz.read(|session| {
        let Some(question) = session.current_question() else {
            return;
        };
        let progress = session.progress();
        println!();
        println!(
            "Question {} of {} [{}] {}%  ⏱ {}",
            progress.position,
            progress.total,
            question.kind(),
            progress.percent.unwrap_or(0),
            session.formatted_time()
        );
        println!("{}", question.prompt());
        for (i, option) in question.options().iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        if let Some(answer) = session.current_answer() {
            println!("(your answer: {answer})");
        }
    });
}

fn print_results(quiz: &LiveQuiz) {
    quiz.read(|session| {
        let score = session.score().unwrap_or(0);
        let verdict = match ScoreBand::from_score(score) {
            ScoreBand::Excellent => "Excellent!",
            ScoreBand::Passing => "Good effort.",
            ScoreBand::NeedsWork => "Keep practicing.",
        };
        println!();
        println!("Quiz complete! {verdict}");
        println!(
            "Score {score}% | Correct {}/{} | Time {}",
            session.correct_count(),
            session.total_questions(),
            session.formatted_time()
        );
        for item in session.review() {
            let mark = if item.result.is_correct { "✓" } else { "✗" };
            println!();
            println!("{mark} {}. {}", item.number, item.question.prompt());
            match &item.result.user_answer {
                Some(answer) => println!("   Your answer: {answer}"),
                None => println!("   Your answer: (none)"),
            }
            if !item.result.is_correct {
                println!("   Correct answer: {}", item.question.correct_answer());
            }
            println!("   {}", item.question.explanation());
        }
    });
}

pub async fn quiz(material: &StudySet, settings: &StudySettings) -> ScreenResult {
    let mut quiz = LiveQuiz::new(material.questions().clone(), settings);

    loop {
        println!(
            "{} Quiz: {} questions. Press enter to start, q to quit.",
            material.topic(),
            material.questions().len()
        );
        match read_line("> ").await? {
            Some(line) if line.trim() == "q" => return Ok(()),
            Some(_) => {}
            None => return Ok(()),
        }
        if let Err(err) = quiz.start() {
            println!("cannot start quiz: {err}");
            return Ok(());
        }

        while quiz.phase() == QuizPhase::InProgress {
            print_question(&quiz);
            let Some(input) = read_line(":back :next :quit, or your answer > ").await? else {
                return Ok(());
            };
            let outcome = match input.trim() {
                ":quit" => return Ok(()),
                ":back" => quiz.retreat().map(|_| ()),
                ":next" => quiz.advance().map(|step| {
                    if let QuizStep::Completed { score } = step {
                        log::info!("quiz finished with {score}%");
                    }
                }),
                _ => {
                    let parsed = quiz.read(|session| {
                        session
                            .current_question()
                            .and_then(|q| parse_answer(q, &input))
                    });
                    match parsed {
                        Some(answer) => quiz.submit_answer(answer),
                        None => {
                            println!("not a valid answer for this question");
                            Ok(())
                        }
                    }
                }
            };
            if let Err(err) = outcome {
                println!("{err}");
            }
        }

        print_results(&quiz);
        match read_line("Retake quiz? [y/N] > ").await? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => quiz.restart(),
            _ => return Ok(()),
        }
    }
}

//
// ─── TUTOR ─────────────────────────────────────────────────────────────────────
//

pub async fn tutor(settings: &StudySettings) -> ScreenResult {
    let mut chat = ChatSession::new(
        Arc::new(KeywordTutor),
        Pacer::new(settings),
        Clock::default_clock(),
    );
    if let Some(greeting) = chat.messages().first() {
        println!("[{}] Tutor: {}", format_clock_time(greeting.sent_at), greeting.content);
    }
    println!();
    println!("Try asking:");
    for question in QUICK_QUESTIONS {
        println!("  • {question}");
    }

    while let Some(line) = read_line("\nYou > ").await? {
        if line.trim() == ":quit" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        println!("Tutor is typing…");
        let reply = chat.send(&line).await?;
        println!("[{}] Tutor: {}", format_clock_time(reply.sent_at), reply.content);
    }
    Ok(())
}

//
// ─── GENERATE ──────────────────────────────────────────────────────────────────
//

pub async fn generate(source: &TopicSource, settings: &StudySettings) -> ScreenResult {
    println!("Generating study materials from {source}…");
    let generator = MaterialGenerator::new(Pacer::new(settings));
    let set = generator.generate(source).await?;
    println!(
        "Study materials for \"{}\" are ready: {} flashcards, {} quiz questions.",
        set.topic(),
        set.cards().len(),
        set.questions().len()
    );
    println!();
    print_material(&set);
    Ok(())
}
