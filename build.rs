use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Emits VERGEN_GIT_SHA for `gostall version`.
    vergen_gitcl::Emitter::default()
        .add_instructions(
            &vergen_gitcl::GitclBuilder::default()
                .sha(true)
                .dirty(true)
                .build()?,
        )?
        .emit()?;
    Ok(())
}
