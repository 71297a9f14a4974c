//! Java text emitted into the obfuscated program.
//!
//! `StringDecryptor.decrypt` must stay the exact inverse of `shroud_core::cipher::encrypt`:
//! Base64 envelope, 16-byte IV prefix, AES-256-CBC with PKCS#7 (`PKCS5Padding` in JCE
//! terms) and the key zero-padded or truncated to 32 bytes.

/// Decrypt utility placed ahead of the generated literal declarations.
pub const DECRYPTOR_STUB: &str = r#"// String decryption utility
import javax.crypto.*;
import javax.crypto.spec.*;
import java.util.Base64;

public static class StringDecryptor {
    public static String decrypt(String encrypted, String key) {
        try {
            byte[] keyBytes = java.util.Arrays.copyOf(key.getBytes("UTF-8"), 32);
            byte[] combined = Base64.getDecoder().decode(encrypted);

            byte[] iv = new byte[16];
            System.arraycopy(combined, 0, iv, 0, 16);

            byte[] encryptedData = new byte[combined.length - 16];
            System.arraycopy(combined, 16, encryptedData, 0, encryptedData.length);

            Cipher cipher = Cipher.getInstance("AES/CBC/PKCS5Padding");
            SecretKeySpec secretKey = new SecretKeySpec(keyBytes, "AES");
            IvParameterSpec ivSpec = new IvParameterSpec(iv);

            cipher.init(Cipher.DECRYPT_MODE, secretKey, ivSpec);
            byte[] decrypted = cipher.doFinal(encryptedData);

            return new String(decrypted, "UTF-8");
        } catch (Exception e) {
            return "";
        }
    }
}

"#;

/// Self-defense routine prepended by the anti-debug pass.
///
/// Checks run in order: debug agent flags, debugger processes, a timing check, and
/// finally a debugger-only class lookup. Any hit terminates the JVM.
pub const ANTI_DEBUG_STUB: &str = r#"// Anti-debugging measures
import java.lang.management.ManagementFactory;
import java.util.List;

public static class AntiDebug {
    public static void check() {
        List<String> arguments = ManagementFactory.getRuntimeMXBean().getInputArguments();
        for (String arg : arguments) {
            if (arg.contains("-agentlib:jdwp") || arg.contains("-Xdebug") || arg.contains("-Xrunjdwp")) {
                System.exit(1);
            }
        }

        String[] debuggerProcesses = {"jdb", "eclipse", "idea", "netbeans", "jvisualvm"};
        try {
            Process proc = Runtime.getRuntime().exec("tasklist");
            java.io.BufferedReader reader = new java.io.BufferedReader(
                new java.io.InputStreamReader(proc.getInputStream()));
            String line;
            while ((line = reader.readLine()) != null) {
                for (String debugger : debuggerProcesses) {
                    if (line.toLowerCase().contains(debugger)) {
                        System.exit(1);
                    }
                }
            }
        } catch (Exception e) {
            // process listing unavailable
        }

        long start = System.nanoTime();
        int dummy = 0;
        for (int i = 0; i < 1000; i++) {
            dummy += i;
        }
        long end = System.nanoTime();

        if ((end - start) > 10_000_000) {
            System.exit(1);
        }

        try {
            Class.forName("sun.jvm.hotspot.tools.jstack.JStack");
            System.exit(1);
        } catch (ClassNotFoundException e) {
            // not running under the serviceability agent
        }
    }
}

"#;

/// Statement inserted as the first line of `main`.
pub const ANTI_DEBUG_CALL: &str = "AntiDebug.check();";

/// Inert statements the dead-code pass picks from.
pub const DEAD_CODE_SNIPPETS: [&str; 5] = [
    "volatile int _dummy1 = new java.util.Random().nextInt(100);\n",
    "volatile long _dummy2 = System.currentTimeMillis() & 0xFF;\n",
    "if (_dummy1 > 200) { System.out.println(\"Never executed\"); }\n",
    "for (int _i = 0; _i < 0; _i++) { _dummy2++; }\n",
    "java.util.List<Integer> _dummy_list = new java.util.ArrayList<>();\n",
];

/// Escapes `value` for use inside a Java double-quoted literal.
fn java_quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `StringDecryptor.decrypt("<envelope>", "<key>")`
pub fn decrypt_call(envelope: &str, key: &str) -> String {
    format!(
        "StringDecryptor.decrypt(\"{envelope}\", \"{}\")",
        java_quote(key)
    )
}

/// Constant declaration binding `var` to the decrypted envelope.
pub fn declaration(var: &str, envelope: &str, key: &str) -> String {
    format!(
        "private static final String {var} = {};",
        decrypt_call(envelope, key)
    )
}
