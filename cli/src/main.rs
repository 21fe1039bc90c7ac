use clap::{Parser, Subcommand};
use opencourse::model::entity::{
    Choice, ChoiceCreate, Course, CourseCreate, Lesson, LessonCreate, Question, QuestionCreate,
    UserEntity, UserEntityCreateUpdate,
};
use opencourse::model::{CrudRepository, DatabaseError, DbConnection, ModelManager};
use opencourse::web::AuthenticatedUser;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the course DB", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },

    /// Manage exam questions
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        /// Course name to attach the lesson to
        #[arg(long)]
        course_name: String,
        #[arg(long)]
        title: String,
        /// Path to a Markdown file with lesson content
        #[arg(long)]
        file: String,
        #[arg(long, default_value_t = 0)]
        order_index: i32,
    },
}

/// Question management
#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    Add {
        /// Course name to attach the question to
        #[arg(long)]
        course_name: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        grade: Option<i32>,
    },
    AddChoice {
        /// Question content to attach the choice to
        #[arg(long)]
        question_content: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value_t = false)]
        is_correct: bool,
    },
}

async fn course_id_by_name(mm: &ModelManager, name: &str) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT id FROM courses WHERE name = $1")
        .bind(name)
        .fetch_one(mm.executor())
        .await
        .map_err(DatabaseError::SqlxError)
}

#[tokio::main]
async fn main() -> opencourse::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect(&std::env::var("DATABASE_URL").expect("DATABASE_URL not set"))?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::admin();

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add { username, password } => {
                let hash = opencourse::auth::hash_password(&password)
                    .expect("Unable to hash password");
                let user = UserEntity::create(
                    &mm,
                    &actor,
                    UserEntityCreateUpdate {
                        username,
                        password_hash: hash,
                        occupation: None,
                    },
                )
                .await?;
                println!("User created: {:?}", user);
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add { name, description } => {
                let course = Course::create(
                    &mm,
                    &actor,
                    CourseCreate {
                        name: Some(name),
                        description,
                        pub_date: None,
                    },
                )
                .await?;
                println!("Course created: {:?}", course);
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add {
                course_name,
                title,
                file,
                order_index,
            } => {
                let course_id = course_id_by_name(&mm, &course_name).await?;

                let content = std::fs::read_to_string(file)?;
                let lesson = Lesson::create(
                    &mm,
                    &actor,
                    LessonCreate {
                        course_id,
                        title: Some(title),
                        order_index: Some(order_index),
                        content,
                    },
                )
                .await?;
                println!("Lesson created: {:?}", lesson);
            }
        },

        Commands::Question { action } => match action {
            QuestionCommands::Add {
                course_name,
                content,
                grade,
            } => {
                let course_id = course_id_by_name(&mm, &course_name).await?;

                let question = Question::create(
                    &mm,
                    &actor,
                    QuestionCreate {
                        course_id,
                        content,
                        grade,
                    },
                )
                .await?;
                println!("Question created: {:?}", question);
            }

            QuestionCommands::AddChoice {
                question_content,
                content,
                is_correct,
            } => {
                let question_id: i64 =
                    sqlx::query_scalar("SELECT id FROM questions WHERE content = $1")
                        .bind(&question_content)
                        .fetch_one(mm.executor())
                        .await
                        .map_err(DatabaseError::SqlxError)?;

                let choice = Choice::create(
                    &mm,
                    &actor,
                    ChoiceCreate {
                        question_id,
                        content,
                        is_correct: Some(is_correct),
                    },
                )
                .await?;
                println!("Choice created: {:?}", choice);
            }
        },
    }

    Ok(())
}
