use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn slotstyle_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("slotstyle"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

pub const WRAPPED: &str = "<template>\n  <my-component><template #default>Content</template></my-component>\n</template>\n";
pub const INLINE: &str = "<template>\n  <my-component #default>Content</my-component>\n</template>\n";
