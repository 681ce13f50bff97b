use resgen::{GenerationResult, Pipeline};
use resgen_codegen::{CodeWriter, ResourceSynthesizer};
use resgen_core::{GeneratorError, Outcome, RunSummary};
use resgen_introspect::{Manifest, ModelRegistry, SchemaSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = r#"
models:
  - class: App\Models\Post
    hidden: [secret]
    relations:
      - { name: comments, kind: has_many, related: App\Models\Comment }
      - { name: author, kind: belongs_to, related: App\Models\User }
    accessors: [excerpt]
  - class: App\Models\Comment
    relations:
      - { name: post, kind: belongs_to, related: App\Models\Post }
      - { name: commentable, kind: morph_to }
      - { name: attachment, kind: morph_one, error: "Class \"App\\Models\\Attachment\" not found" }
  - class: App\Models\Casts\Money
    model: false
"#;

const POST: &str = r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Model;

class Post extends Model
{
    protected $hidden = ['secret'];

    public function comments()
    {
        return $this->hasMany(Comment::class);
    }
}
"#;

const COMMENT: &str = r#"<?php

namespace App\Models;

class Comment extends Model
{
}
"#;

const MONEY: &str = r#"<?php

namespace App\Models\Casts;

final class Money
{
}
"#;

struct Fixture {
    temp_dir: TempDir,
    registry: ModelRegistry,
    schema: SchemaSnapshot,
    synthesizer: ResourceSynthesizer,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("app/Models")).unwrap();

        let registry = Manifest::from_yaml(MANIFEST)
            .unwrap()
            .into_registry("resgen.models.yaml");
        let schema = SchemaSnapshot::new()
            .with_table("posts", ["id", "title", "body", "secret"])
            .with_table("comments", ["id", "post_id", "body"]);
        let synthesizer = ResourceSynthesizer::new("App\\Http\\Resources").unwrap();

        Self {
            temp_dir,
            registry,
            schema,
            synthesizer,
        }
    }

    fn model_dir(&self) -> PathBuf {
        self.temp_dir.path().join("app/Models")
    }

    fn resource_dir(&self) -> PathBuf {
        self.temp_dir.path().join("app/Http/Resources")
    }

    fn add_model(&self, file: &str, source: &str) {
        fs::write(self.model_dir().join(file), source).unwrap();
    }

    fn run(&self, overwrite: bool) -> (RunSummary, Vec<GenerationResult>) {
        self.run_into(&self.resource_dir(), overwrite).unwrap()
    }

    fn run_into(
        &self,
        resource_dir: &Path,
        overwrite: bool,
    ) -> Result<(RunSummary, Vec<GenerationResult>), GeneratorError> {
        let writer = CodeWriter::new(resource_dir, "php");
        let pipeline = Pipeline::new(&self.registry, &self.schema, &self.synthesizer, &writer, overwrite);

        let mut results = Vec::new();
        let summary = pipeline.run(&self.model_dir(), |result| results.push(result.clone()))?;
        Ok((summary, results))
    }

    fn resource(&self, type_name: &str) -> String {
        fs::read_to_string(self.resource_dir().join(format!("{}Resource.php", type_name))).unwrap()
    }
}

#[test]
fn test_generates_post_resource() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);

    let (summary, results) = fixture.run(true);

    assert_eq!(summary.created, 1);
    assert_eq!(summary.total, 1);
    assert!(summary.errors.is_empty());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].model, "App\\Models\\Post");
    assert_eq!(results[0].outcome, Outcome::Created);

    let resource = fixture.resource("Post");
    assert!(resource.contains("namespace App\\Http\\Resources;"));
    assert!(resource.contains("class PostResource extends JsonResource"));
    assert!(resource.contains("'id' => $this->id,"));
    assert!(resource.contains("'title' => $this->title,"));
    assert!(resource.contains("'body' => $this->body,"));
    assert!(!resource.contains("secret"));
    assert!(resource.contains(
        "            'comments' => CommentResource::collection($this->whenLoaded('comments')),"
    ));
    assert!(resource.contains("            'author' => $this->whenLoaded('author'),"));
}

#[test]
fn test_existing_resource_is_skipped_without_overwrite() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);
    fixture.run(true);

    let path = fixture.resource_dir().join("PostResource.php");
    fs::write(&path, "hand edited").unwrap();

    let (summary, results) = fixture.run(false);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.created, 0);
    assert_eq!(summary.overwritten, 0);
    assert_eq!(results[0].outcome, Outcome::Skipped);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
}

#[test]
fn test_existing_resource_is_overwritten() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);
    fixture.run(true);

    let path = fixture.resource_dir().join("PostResource.php");
    fs::write(&path, "hand edited").unwrap();

    let (summary, _) = fixture.run(true);
    assert_eq!(summary.overwritten, 1);
    assert_eq!(summary.created, 0);
    assert!(fixture.resource("Post").contains("class PostResource"));
}

#[test]
fn test_failing_accessor_keeps_other_relations() {
    let fixture = Fixture::new();
    fixture.add_model("Comment.php", COMMENT);

    let (summary, _) = fixture.run(true);

    assert_eq!(summary.created, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("Error while executing method App\\Models\\Comment::attachment"));

    let resource = fixture.resource("Comment");
    assert!(resource.contains("'post' => $this->whenLoaded('post'),"));
    assert!(!resource.contains("attachment"));
}

#[test]
fn test_polymorphic_relation_without_target_is_singular() {
    let fixture = Fixture::new();
    fixture.add_model("Comment.php", COMMENT);

    let (summary, _) = fixture.run(true);

    assert!(summary.errors.iter().all(|e| !e.contains("commentable")));
    assert!(fixture
        .resource("Comment")
        .contains("            'commentable' => $this->whenLoaded('commentable'),"));
}

#[test]
fn test_file_without_declaration_fails_alone() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);
    fixture.add_model("helpers.php", "<?php\n\nfunction money_format() {}\n");

    let (summary, _) = fixture.run(true);

    assert_eq!(summary.total, 2);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.errors.iter().any(|e| e.contains("helpers.php")));
}

#[test]
fn test_non_model_class_is_a_warning() {
    let fixture = Fixture::new();
    fixture.add_model("Money.php", MONEY);

    let (summary, results) = fixture.run(true);

    assert!(results.is_empty());
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.warnings, vec!["App\\Models\\Casts\\Money is not a valid model class.".to_string()]);
    assert!(summary.errors.is_empty());
    assert!(!fixture.resource_dir().join("MoneyResource.php").exists());
}

#[test]
fn test_unregistered_model_does_not_stop_the_run() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);
    fixture.add_model("Tag.php", "<?php\nnamespace App\\Models;\nclass Tag extends Model {}\n");

    let (summary, results) = fixture.run(true);

    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(results.len(), 1);
    assert!(summary.errors.iter().any(|e| e.contains("App\\Models\\Tag")));
}

#[test]
fn test_unavailable_output_directory_is_fatal() {
    let fixture = Fixture::new();
    fixture.add_model("Post.php", POST);

    let blocker = fixture.temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = fixture.run_into(&blocker.join("Resources"), true).unwrap_err();
    assert!(matches!(err, GeneratorError::OutputDirectoryUnavailable { .. }));
}
