// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::core::{ConfigManager, Database, ServiceClient};
use crate::ranking::{
    candidate_openings, export_leaderboard, group_by_tag, questions_for_tag,
    recruiter_tag_summaries, AnalysisFlow, RankingAggregator, ScoreBand, TagScoreStats,
};
use crate::services::{
    AnalysisClient, AnswerService, AnswerStore, AuthService, QuestionService, QuestionStore,
};
use crate::types::{
    analysis::criterion_label, response::ProfileUpdate, RankedCandidate, SessionContext,
    UserRole,
};

#[derive(Parser)]
#[command(name = "recruit-ranker")]
#[command(about = "Screen candidates: manage questions, collect answers and rank them by AI score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account (role: recruiter or candidate)
    Register {
        name: String,
        email: String,
        password: String,
        #[arg(long, default_value = "candidate")]
        role: String,
    },
    /// Log in and remember the session locally
    Login { email: String, password: String },
    /// Forget the local session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update name, email or role of the signed-in user
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// List every tag with its question count
    Tags,
    /// List questions, optionally only your own
    Questions {
        #[arg(long)]
        mine: bool,
    },
    /// Create one or more questions under a tag
    CreateQuestion {
        tag: String,
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Delete a question
    DeleteQuestion { id: String },
    /// List the questions of a tag, marking those you answered
    TagQuestions { tag: String },
    /// Answer a question as the signed-in candidate
    Answer { question_id: String, text: String },
    /// Answers received per tag for your questions
    Results,
    /// Tags open to candidates and whether you started them
    Openings,
    /// Rank the candidates who answered your questions under a tag
    Rank {
        tag: String,
        /// Write the leaderboard to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the leaderboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank the candidates who answered one question
    RankQuestion { question_id: String },
    /// Score distribution of a tag's leaderboard
    Stats { tag: String },
    /// Show the AI analysis of an answer, requesting it when none is known
    Analyze {
        answer_id: String,
        /// Ignore cached and embedded results and ask the scoring service again
        #[arg(long)]
        refresh: bool,
    },
}

/// Everything a command may need, built once per invocation
pub struct AppContext {
    pub db: Database,
    pub questions: QuestionService,
    pub answers: AnswerService,
    pub auth: AuthService,
    pub analysis: AnalysisClient,
}

impl AppContext {
    pub async fn new(config: &ConfigManager) -> Result<Self> {
        let db = Database::new(&config.storage.database_path).await?;
        let client = Arc::new(ServiceClient::new(
            &config.service.api_base_url,
            config.service.timeout_seconds,
        )?);

        Ok(Self {
            db,
            questions: QuestionService::new(client.clone()),
            answers: AnswerService::new(client.clone()),
            auth: AuthService::new(client.clone()),
            analysis: AnalysisClient::new(client),
        })
    }

    async fn require_session(&self) -> Result<SessionContext> {
        self.db
            .load_session()
            .await?
            .context("Not logged in. Run `recruit-ranker login` first.")
    }

    async fn require_recruiter(&self) -> Result<SessionContext> {
        let session = self.require_session().await?;
        if !session.is_recruiter() {
            anyhow::bail!("This command is only available to recruiters");
        }
        Ok(session)
    }

    fn aggregator(&self) -> RankingAggregator<'_, QuestionService, AnswerService, Database> {
        RankingAggregator::new(&self.questions, &self.answers, &self.db)
    }
}

pub async fn handle_command(cli: Cli, config: &ConfigManager) -> Result<()> {
    let ctx = AppContext::new(config).await?;

    match cli.command {
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            ctx.auth.register(&name, &email, &password, &role).await?;
            println!(
                "✅ Account created for {} ({})",
                email,
                UserRole::from_user_input(&role).as_str()
            );
        }

        Command::Login { email, password } => {
            let session = ctx.auth.login(&email, &password).await?;
            ctx.db.save_session(&session).await?;
            println!(
                "✅ Welcome, {} ({})",
                session.first_name(),
                session.role.as_str()
            );
        }

        Command::Logout => {
            ctx.db.clear_session().await?;
            println!("Logged out.");
        }

        Command::Whoami => match ctx.db.load_session().await? {
            Some(session) => {
                println!("{} <{}>", session.name, session.email.as_deref().unwrap_or("-"));
                println!("  id:   {}", session.user_id);
                println!("  role: {}", session.role.as_str());
            }
            None => println!("Not logged in."),
        },

        Command::UpdateProfile { name, email, role } => {
            let session = ctx.require_session().await?;
            let update = ProfileUpdate {
                nome: name,
                email,
                tipo_usuario: role
                    .map(|r| UserRole::from_user_input(&r).backend_code().to_string()),
            };
            let updated = ctx.auth.update_profile(&session, &update).await?;
            ctx.db.save_session(&updated).await?;
            println!("✅ Profile updated: {} ({})", updated.name, updated.role.as_str());
        }

        Command::Tags => {
            let questions = ctx.questions.list_all().await?;
            let groups = group_by_tag(&questions);
            if groups.is_empty() {
                println!("No questions yet.");
            }
            for group in groups {
                println!("{:<30} {:>4} question(s)", group.tag, group.question_count);
            }
        }

        Command::Questions { mine } => {
            let owner = if mine {
                Some(ctx.require_session().await?.user_id)
            } else {
                None
            };
            let questions = ctx.questions.list_all().await?;
            for question in questions
                .iter()
                .filter(|q| owner.as_deref().map_or(true, |id| q.is_owned_by(id)))
            {
                println!("{:<26} [{}] {}", question.id, question.grouping_key(), question.text);
            }
        }

        Command::CreateQuestion { tag, texts } => {
            let session = ctx.require_recruiter().await?;
            let created = ctx.questions.create_many(&texts, &tag, &session).await?;
            println!("✅ Created {} question(s) under '{}'", created.len(), tag);
        }

        Command::DeleteQuestion { id } => {
            ctx.require_recruiter().await?;
            ctx.questions.delete(&id).await?;
            println!("✅ Deleted question {}", id);
        }

        Command::TagQuestions { tag } => {
            let session = ctx.db.load_session().await?;
            let (questions, answers) =
                tokio::try_join!(ctx.questions.list_all(), ctx.answers.list_all())?;
            let candidate_id = session
                .as_ref()
                .filter(|s| !s.is_recruiter())
                .map(|s| s.user_id.as_str());

            let listing = questions_for_tag(&tag, candidate_id, &questions, &answers);
            if listing.questions.is_empty() {
                println!("No questions under '{}'.", tag);
            }
            for (idx, question) in listing.questions.iter().enumerate() {
                let mark = if listing.is_answered(&question.id) { "✓" } else { " " };
                println!("{} {:>2}. {} ({})", mark, idx + 1, question.text, question.id);
            }
        }

        Command::Answer { question_id, text } => {
            let session = ctx.require_session().await?;
            ctx.answers.submit(&question_id, &text, &session).await?;
            println!("✅ Answer submitted");
        }

        Command::Results => {
            let session = ctx.require_recruiter().await?;
            let (questions, answers) =
                tokio::try_join!(ctx.questions.list_all(), ctx.answers.list_all())?;
            let summaries = recruiter_tag_summaries(&session.user_id, &questions, &answers);
            if summaries.is_empty() {
                println!("You have not created any questions yet.");
            }
            for summary in summaries {
                println!("{:<30} {:>4} candidate answer(s)", summary.tag, summary.candidate_count);
            }
        }

        Command::Openings => {
            let session = ctx.require_session().await?;
            let (questions, answers) =
                tokio::try_join!(ctx.questions.list_all(), ctx.answers.list_all())?;
            println!("Hello, {}!", session.first_name());
            for opening in candidate_openings(&session.user_id, &questions, &answers) {
                println!(
                    "{:<30} {:>4} question(s)  {}",
                    opening.tag,
                    opening.question_count,
                    opening.status.as_str()
                );
            }
        }

        Command::Rank { tag, csv, json } => {
            let session = ctx.require_recruiter().await?;
            let ranking = ctx.aggregator().rank_tag(&session, &tag).await?;

            if let Some(path) = csv {
                export_leaderboard(&path, &ranking)?;
                info!("Leaderboard for '{}' exported to {}", tag, path.display());
                println!("Leaderboard written to {}", path.display());
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ranking).context("Failed to encode leaderboard")?
                );
            } else {
                println!("{}: ordered by highest score", tag);
                print_leaderboard(&ranking);
            }
        }

        Command::RankQuestion { question_id } => {
            ctx.require_recruiter().await?;
            let ranking = ctx.aggregator().rank_question(&question_id).await?;
            print_leaderboard(&ranking);
        }

        Command::Stats { tag } => {
            let session = ctx.require_recruiter().await?;
            let ranking = ctx.aggregator().rank_tag(&session, &tag).await?;
            let stats = TagScoreStats::from_candidates(&tag, &ranking);

            println!("{}", stats.tag);
            println!(
                "  candidates: {} ({} analyzed, {} pending)",
                stats.total, stats.analyzed, stats.pending
            );
            match (stats.mean_score, stats.min_score, stats.max_score) {
                (Some(mean), Some(min), Some(max)) => {
                    println!("  mean: {:.1}  min: {}  max: {}", mean, min, max)
                }
                _ => println!("  no analyzed answers yet"),
            }
            println!(
                "  strong: {}  moderate: {}  weak: {}",
                stats.strong, stats.moderate, stats.weak
            );
        }

        Command::Analyze { answer_id, refresh } => {
            ctx.require_recruiter().await?;
            let (questions, answers) =
                tokio::try_join!(ctx.questions.list_all(), ctx.answers.list_all())?;
            let answer = answers
                .iter()
                .find(|a| a.id == answer_id)
                .with_context(|| format!("Answer not found: {}", answer_id))?;
            let context = questions
                .iter()
                .find(|q| q.id == answer.question_id)
                .map(|q| q.text.as_str())
                .unwrap_or_default();

            let flow = AnalysisFlow::new(&ctx.db, &ctx.analysis);
            let resolved = if refresh {
                flow.analyze_fresh(&answer.id, context).await?
            } else {
                flow.resolve(answer, context).await?
            };
            let result = &resolved.result;

            println!("Candidate: {}", answer.candidate_name);
            println!("Answer:    \"{}\"", answer.text);
            println!(
                "Overall:   {} ({})  [source: {:?}]",
                result.rounded_score(),
                ScoreBand::from_score(result.rounded_score()).as_str(),
                resolved.source
            );
            for (criterion, score) in &result.criteria_scores {
                println!("  {:<28} {:>5.0}/100", criterion_label(criterion), score);
            }
            for note in &result.notes {
                println!("  - {}", note);
            }
            println!("Conclusion: {}", result.conclusion_or_default());
        }
    }

    Ok(())
}

fn print_leaderboard(ranking: &[RankedCandidate]) {
    if ranking.is_empty() {
        println!("No answers to rank.");
        return;
    }

    for (idx, candidate) in ranking.iter().enumerate() {
        let score = if candidate.is_pending() {
            "pending".to_string()
        } else {
            format!("{:>3} pts", candidate.score)
        };
        println!(
            "#{:<3} {:<24} {:>8}  Q{} {}",
            idx + 1,
            candidate.candidate_name,
            score,
            candidate.question_index_within_tag,
            candidate.answer_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_with_csv() {
        let cli =
            Cli::try_parse_from(["recruit-ranker", "rank", "React", "--csv", "out.csv"]).unwrap();
        match cli.command {
            Command::Rank { tag, csv, json } => {
                assert_eq!(tag, "React");
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(!json);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_create_question_requires_text() {
        assert!(Cli::try_parse_from(["recruit-ranker", "create-question", "React"]).is_err());
    }
}
